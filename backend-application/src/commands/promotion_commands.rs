use tracing::info;
use uuid::Uuid;

use backend_domain::{
    evaluate_promotion, Event, EventHistory, EventSnapshot, EventStatus, ReportKind,
};

use crate::{AppError, AppState};

/// Applies the shared quorum rule to one event and, when it fires,
/// records the audit entry before mutating the event. Both the real-time
/// intake path and the batch sweep resolve promotions through here.
pub async fn try_promote(
    state: &AppState,
    event: &Event,
    kind: ReportKind,
    report_count: i64,
) -> Result<Option<EventStatus>, AppError> {
    let Some(target) = evaluate_promotion(event.status, kind, report_count, state.config.report_quorum)
    else {
        return Ok(None);
    };

    let before = EventSnapshot::of(event);
    let mut after = before.clone();
    after.status = target.as_str().to_string();

    // History first so the audit entry is causally ordered ahead of the
    // mutation it documents.
    state
        .history_repo
        .insert(&EventHistory {
            id: Uuid::new_v4(),
            event_id: event.id,
            reason: format!(
                "auto-promoted to {} after {} {} reports",
                target.as_str(),
                report_count,
                kind.as_str()
            ),
            before,
            after,
            created_at: state.clock.now_millis(),
        })
        .await?;
    state.event_repo.update_status(event.id, target).await?;
    state.metrics.record_promotion();
    info!(
        event_id = %event.id,
        status = target.as_str(),
        report_count,
        kind = kind.as_str(),
        "event promoted by report quorum"
    );
    Ok(Some(target))
}
