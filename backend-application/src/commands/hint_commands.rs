use tracing::debug;
use uuid::Uuid;

use backend_domain::{cluster_move_reports, reconcile_hints, MoveHint, MoveObservation};

use crate::{AppError, AppState};

/// Thin persistence wrapper around the pure clustering engine: reload
/// the event's complete positioned move-report log, recompute every
/// cluster from scratch, then reconcile against the stored active hints.
/// Full recomputation instead of incremental patching keeps this free of
/// lost-update races. Only MoveHint rows are touched, never the event.
pub async fn sync_move_hints(state: &AppState, event_id: Uuid) -> Result<(), AppError> {
    let reports = state.report_repo.list_positioned_move_reports(event_id).await?;
    let observations: Vec<MoveObservation> = reports
        .iter()
        .filter_map(|report| {
            report.position().map(|position| MoveObservation {
                position,
                reported_at: report.created_at,
            })
        })
        .collect();

    let candidates = cluster_move_reports(&observations, state.config.cluster_radius_m);
    let active = state.hint_repo.list_active_by_event(event_id).await?;
    let plan = reconcile_hints(&active, &candidates, state.config.hint_match_radius_m);

    debug!(
        %event_id,
        reports = observations.len(),
        clusters = candidates.len(),
        updates = plan.updates.len(),
        creates = plan.creates.len(),
        deactivated = plan.deactivate.len(),
        "move hints recomputed"
    );

    for hint in &plan.updates {
        state.hint_repo.upsert(hint).await?;
    }
    for candidate in &plan.creates {
        state
            .hint_repo
            .upsert(&MoveHint {
                id: Uuid::new_v4(),
                event_id,
                lat: candidate.centroid.lat,
                lng: candidate.centroid.lng,
                report_count: candidate.report_count,
                last_report_at: candidate.last_report_at,
                active: true,
            })
            .await?;
    }
    if !plan.deactivate.is_empty() {
        state.hint_repo.deactivate(&plan.deactivate).await?;
    }
    Ok(())
}
