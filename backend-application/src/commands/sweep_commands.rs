use serde::Serialize;
use tracing::{debug, info, warn};

use backend_domain::{ChangeRequest, ChangeRequestStatus};

use crate::commands::promotion_commands;
use crate::{AppError, AppState};

#[derive(Debug, Default, Serialize)]
pub struct SweepSummary {
    pub processed: u64,
    pub approved: u64,
    pub errors: u64,
}

/// Periodic, idempotent twin of the real-time quorum check: re-evaluates
/// pending report-start/report-end requests that arrived through the
/// structured path, and heals promotions the live path missed. Each row
/// commits independently; one bad row never aborts the sweep.
pub async fn run_auto_promotion(state: &AppState) -> Result<SweepSummary, AppError> {
    let pending = state.request_repo.list_pending_report_requests().await?;
    let mut summary = SweepSummary::default();

    for request in &pending {
        summary.processed += 1;
        match sweep_one(state, request).await {
            Ok(true) => summary.approved += 1,
            Ok(false) => {}
            Err(err) => {
                summary.errors += 1;
                warn!(request_id = %request.id, error = %err, "sweep row failed");
            }
        }
    }

    state.metrics.record_sweep();
    info!(
        processed = summary.processed,
        approved = summary.approved,
        errors = summary.errors,
        "auto-promotion sweep finished"
    );
    Ok(summary)
}

async fn sweep_one(state: &AppState, request: &ChangeRequest) -> anyhow::Result<bool> {
    let Some(kind) = request.request_type.promotion_kind() else {
        return Ok(false);
    };
    let Some(event_id) = request.event_id else {
        debug!(request_id = %request.id, "skipping report request without event reference");
        return Ok(false);
    };
    let Some(event) = state.event_repo.get(event_id).await? else {
        anyhow::bail!("event {} not found", event_id);
    };

    let count = state
        .report_repo
        .count_by_event_and_kind(event_id, kind)
        .await?;
    let promoted = promotion_commands::try_promote(state, &event, kind, count)
        .await
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    // Below quorum the request simply stays pending for a later pass.
    // At or past the target status the quorum has been served either
    // way, so the request is settled.
    if promoted.is_none() && count < state.config.report_quorum {
        return Ok(false);
    }
    state
        .request_repo
        .update_status(
            request.id,
            ChangeRequestStatus::Approved,
            None,
            state.clock.now_millis(),
        )
        .await?;
    Ok(true)
}
