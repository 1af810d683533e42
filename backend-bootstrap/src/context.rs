use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use backend_application::{AppState, Metrics, SlidingWindow};
use backend_infrastructure::{AppConfig, SqliteRepo, SystemClock};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let repo = Arc::new(SqliteRepo::connect(&runtime_config.database_path).await?);
        repo.ensure_schema().await?;

        let throttle = SlidingWindow::new(
            runtime_config.throttle_limit,
            runtime_config.throttle_window_seconds,
        );

        let state = AppState {
            config: runtime_config,
            event_repo: repo.clone(),
            report_repo: repo.clone(),
            hint_repo: repo.clone(),
            request_repo: repo.clone(),
            history_repo: repo,
            clock: Arc::new(SystemClock),
            throttle: Arc::new(Mutex::new(throttle)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
