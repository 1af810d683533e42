use tracing::info;
use uuid::Uuid;

use backend_domain::{
    reporter_fingerprint, GeoPoint, Report, ReportInsert, ReporterContext, ReportKind,
    SubmitReportRequest,
};

use crate::commands::{hint_commands, promotion_commands};
use crate::{AppError, AppState};

/// Single-signal report intake. Enforces exactly-once per
/// (event, kind, reporter) via the store's uniqueness constraint and
/// triggers real-time quorum promotion.
pub async fn submit_report(
    state: &AppState,
    request: SubmitReportRequest,
    reporter: &ReporterContext,
) -> Result<Report, AppError> {
    let position = validate_position(request.lat, request.lng)?;

    let event = state
        .event_repo
        .get(request.event_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("event {} not found", request.event_id)))?;

    let fingerprint = reporter_fingerprint(
        &state.config.reporter_salt,
        &reporter.remote_addr,
        &reporter.user_agent,
    );
    let report = Report {
        id: Uuid::new_v4(),
        event_id: event.id,
        kind: request.kind,
        lat: position.map(|p| p.lat),
        lng: position.map(|p| p.lng),
        fingerprint,
        created_at: state.clock.now_millis(),
    };

    // Insert and uniqueness check are one atomic store operation; a
    // retry after a transient failure lands here as a harmless conflict.
    match state.report_repo.insert(&report).await? {
        ReportInsert::Inserted => {}
        ReportInsert::Duplicate => {
            state.metrics.record_report_conflict();
            return Err(AppError::Conflict("already reported".to_string()));
        }
    }
    state.metrics.record_report();

    if request.kind.is_promotable() {
        // Fresh count after insert; concurrent submissions may both see
        // quorum, and promotion is a no-op past the target status.
        let count = state
            .report_repo
            .count_by_event_and_kind(event.id, request.kind)
            .await?;
        promotion_commands::try_promote(state, &event, request.kind, count).await?;
    }

    if request.kind == ReportKind::Move && position.is_some() {
        info!(event_id = %event.id, "move report accepted, recomputing hints");
        hint_commands::sync_move_hints(state, event.id).await?;
    }

    Ok(report)
}

/// A position is either absent or a complete, in-range pair.
pub(crate) fn validate_position(
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Option<GeoPoint>, AppError> {
    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let point = GeoPoint::new(lat, lng);
            if !point.is_valid() {
                return Err(AppError::BadRequest(format!(
                    "coordinates out of range: {}, {}",
                    lat, lng
                )));
            }
            Ok(Some(point))
        }
        _ => Err(AppError::BadRequest(
            "lat and lng must be supplied together".to_string(),
        )),
    }
}
