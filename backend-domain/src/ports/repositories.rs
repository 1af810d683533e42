use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    ChangeRequest, Event, EventHistory, MoveHint, NewEvent, Report, ReportInsert,
};
use crate::value_objects::{ChangeRequestStatus, EventStatus, ReportKind};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Event>>;
    async fn create(&self, event: &NewEvent, now: i64) -> anyhow::Result<Event>;
    async fn update_status(&self, id: Uuid, status: EventStatus) -> anyhow::Result<()>;
    async fn update_position(&self, id: Uuid, lat: f64, lng: f64) -> anyhow::Result<()>;
    async fn update_times(
        &self,
        id: Uuid,
        start_at: Option<i64>,
        end_at: Option<i64>,
        time_known: bool,
    ) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Atomic against the store's uniqueness constraint on
    /// (event_id, kind, fingerprint). Never an application-level
    /// check-then-act.
    async fn insert(&self, report: &Report) -> anyhow::Result<ReportInsert>;
    async fn count_by_event_and_kind(&self, event_id: Uuid, kind: ReportKind)
        -> anyhow::Result<i64>;
    /// Move reports carrying a position, oldest first.
    async fn list_positioned_move_reports(&self, event_id: Uuid) -> anyhow::Result<Vec<Report>>;
}

#[async_trait]
pub trait MoveHintRepository: Send + Sync {
    async fn list_active_by_event(&self, event_id: Uuid) -> anyhow::Result<Vec<MoveHint>>;
    async fn upsert(&self, hint: &MoveHint) -> anyhow::Result<()>;
    async fn deactivate(&self, ids: &[Uuid]) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ChangeRequestRepository: Send + Sync {
    async fn insert(&self, request: &ChangeRequest) -> anyhow::Result<()>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<ChangeRequest>>;
    async fn list_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<ChangeRequest>>;
    /// Pending report-start/report-end requests the promotion sweep scans.
    async fn list_pending_report_requests(&self) -> anyhow::Result<Vec<ChangeRequest>>;
    async fn update_status(
        &self,
        id: Uuid,
        status: ChangeRequestStatus,
        reviewer: Option<&str>,
        reviewed_at: i64,
    ) -> anyhow::Result<()>;
    /// Fans duplicate suppression out to every still-pending request
    /// sharing the dedupe key. Returns the number of rows transitioned.
    async fn mark_pending_duplicates_by_dedupe_key(
        &self,
        dedupe_key: &str,
        reviewer: Option<&str>,
        reviewed_at: i64,
    ) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait EventHistoryRepository: Send + Sync {
    /// Append-only.
    async fn insert(&self, history: &EventHistory) -> anyhow::Result<()>;
}
