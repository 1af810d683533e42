use std::sync::Arc;

use backend_domain::ports::{
    ChangeRequestRepository, Clock, EventHistoryRepository, EventRepository, MoveHintRepository,
    ReportRepository,
};
use backend_domain::RuntimeConfig;
use tokio::sync::Mutex;

use crate::{Metrics, SlidingWindow};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_repo: Arc<dyn EventRepository>,
    pub report_repo: Arc<dyn ReportRepository>,
    pub hint_repo: Arc<dyn MoveHintRepository>,
    pub request_repo: Arc<dyn ChangeRequestRepository>,
    pub history_repo: Arc<dyn EventHistoryRepository>,
    pub clock: Arc<dyn Clock>,
    pub throttle: Arc<Mutex<SlidingWindow>>,
    pub metrics: Arc<Metrics>,
}
