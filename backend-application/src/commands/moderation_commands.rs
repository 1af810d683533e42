use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use backend_domain::{
    ChangeRequest, ChangeRequestStatus, ChangeRequestType, EventHistory, EventSnapshot,
    GeoPoint, ModerationAction, NewEvent,
};

use crate::commands::hint_commands;
use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct ResolveOutcome {
    pub updated_count: u64,
    pub warnings: Vec<String>,
}

/// One batch item's apply step could not complete. Collected as a
/// warning; the item stays Pending for manual resolution. Deliberately
/// not AppError: a per-item failure must never abort the batch.
#[derive(Debug)]
struct ApplyError(String);

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<anyhow::Error> for ApplyError {
    fn from(err: anyhow::Error) -> Self {
        ApplyError(err.to_string())
    }
}

/// Reviewer-triggered bulk approve/reject. Approvals are applied one at
/// a time, each committing independently; there is no rollback of prior
/// rows when a later one fails.
pub async fn resolve_requests(
    state: &AppState,
    ids: &[Uuid],
    action: ModerationAction,
    reviewer: &str,
) -> Result<ResolveOutcome, AppError> {
    let requests = state.request_repo.list_by_ids(ids).await?;
    let pending: Vec<&ChangeRequest> = requests
        .iter()
        .filter(|request| request.status == ChangeRequestStatus::Pending)
        .collect();
    if pending.is_empty() {
        return Err(AppError::NotFound(
            "no pending change requests among the given ids".to_string(),
        ));
    }

    match action {
        ModerationAction::Reject => reject_all(state, &pending, reviewer).await,
        ModerationAction::Approve => approve_each(state, &pending, reviewer).await,
    }
}

/// Non-pending targets were already filtered out: rejecting them again
/// is intentionally a silent no-op.
async fn reject_all(
    state: &AppState,
    pending: &[&ChangeRequest],
    reviewer: &str,
) -> Result<ResolveOutcome, AppError> {
    let now = state.clock.now_millis();
    let mut updated_count = 0;
    for request in pending {
        state
            .request_repo
            .update_status(request.id, ChangeRequestStatus::Rejected, Some(reviewer), now)
            .await?;
        updated_count += 1;
    }
    state.metrics.record_rejected(updated_count);
    info!(reviewer, updated_count, "change requests rejected");
    Ok(ResolveOutcome {
        updated_count,
        warnings: Vec::new(),
    })
}

async fn approve_each(
    state: &AppState,
    pending: &[&ChangeRequest],
    reviewer: &str,
) -> Result<ResolveOutcome, AppError> {
    let mut updated_count = 0;
    let mut warnings = Vec::new();
    let mut approved_keys: Vec<String> = Vec::new();

    // Strictly sequential so per-item failures stay attributable and
    // history writes stay ordered relative to the event mutations they
    // document.
    for request in pending {
        match apply_request(state, request).await {
            Ok(()) => {
                let now = state.clock.now_millis();
                state
                    .request_repo
                    .update_status(request.id, ChangeRequestStatus::Approved, Some(reviewer), now)
                    .await?;
                updated_count += 1;
                if let Some(key) = &request.dedupe_key {
                    if !approved_keys.contains(key) {
                        approved_keys.push(key.clone());
                    }
                }
            }
            Err(err) => {
                warn!(request_id = %request.id, error = %err, "apply failed, request stays pending");
                warnings.push(format!("{}: {}", request.id, err));
            }
        }
    }
    state.metrics.record_approved(updated_count);

    // Duplicate suppression: requests subsumed by an approval are marked
    // Duplicate, not Rejected.
    let now = state.clock.now_millis();
    for key in &approved_keys {
        let marked = state
            .request_repo
            .mark_pending_duplicates_by_dedupe_key(key, Some(reviewer), now)
            .await?;
        if marked > 0 {
            state.metrics.record_duplicates(marked);
            info!(dedupe_key = key.as_str(), marked, "pending duplicates suppressed");
        }
    }

    info!(reviewer, updated_count, warnings = warnings.len(), "change requests approved");
    Ok(ResolveOutcome {
        updated_count,
        warnings,
    })
}

/// Applies the mutation a request encodes. Every failure path returns
/// ApplyError so the caller folds it into the batch summary.
async fn apply_request(state: &AppState, request: &ChangeRequest) -> Result<(), ApplyError> {
    match request.request_type {
        ChangeRequestType::CreateEvent => apply_create_event(state, request).await,
        // Designed to resolve only through report quorum (live intake or
        // the batch sweep); direct approval would double-process them.
        ChangeRequestType::ReportStart | ChangeRequestType::ReportEnd => Err(ApplyError(format!(
            "{} requests resolve by report quorum and cannot be approved directly",
            request.request_type.as_str()
        ))),
        ChangeRequestType::ReportMove => apply_move(state, request).await,
        ChangeRequestType::ReportTimeChange => apply_time_change(state, request).await,
        // The approved record itself is the outcome; nothing to mutate.
        ChangeRequestType::RivalActivity => Ok(()),
    }
}

async fn apply_create_event(state: &AppState, request: &ChangeRequest) -> Result<(), ApplyError> {
    let payload = &request.payload;
    let venue = payload
        .venue
        .as_deref()
        .map(str::trim)
        .filter(|venue| !venue.is_empty())
        .ok_or_else(|| ApplyError("payload is missing the venue text".to_string()))?;
    // Legacy payloads predate the mandatory-coordinates rule; give the
    // reviewer something actionable instead of a generic failure.
    let (lat, lng) = match (payload.lat, payload.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(ApplyError(
                "payload is missing lat/lng; ask the submitter for the venue position".to_string(),
            ))
        }
    };
    if !GeoPoint::new(lat, lng).is_valid() {
        return Err(ApplyError(format!("coordinates out of range: {}, {}", lat, lng)));
    }

    let event = state
        .event_repo
        .create(
            &NewEvent {
                candidate_id: request.candidate_id,
                venue: venue.to_string(),
                lat,
                lng,
                start_at: payload.start_at,
                end_at: payload.end_at,
            },
            state.clock.now_millis(),
        )
        .await?;
    info!(event_id = %event.id, request_id = %request.id, "event created from approved request");
    Ok(())
}

async fn apply_move(state: &AppState, request: &ChangeRequest) -> Result<(), ApplyError> {
    let event_id = request
        .event_id
        .ok_or_else(|| ApplyError("report-move request has no event reference".to_string()))?;
    let (lat, lng) = match (request.payload.lat, request.payload.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(ApplyError("payload is missing the new lat/lng".to_string())),
    };
    if !GeoPoint::new(lat, lng).is_valid() {
        return Err(ApplyError(format!("coordinates out of range: {}, {}", lat, lng)));
    }

    let event = state
        .event_repo
        .get(event_id)
        .await?
        .ok_or_else(|| ApplyError(format!("event {} not found", event_id)))?;

    let before = EventSnapshot::of(&event);
    let mut after = before.clone();
    after.lat = lat;
    after.lng = lng;
    state
        .history_repo
        .insert(&EventHistory {
            id: Uuid::new_v4(),
            event_id,
            reason: format!("position updated by approved request {}", request.id),
            before,
            after,
            created_at: state.clock.now_millis(),
        })
        .await?;

    // Venue label is deliberately untouched; only the coordinates move.
    state.event_repo.update_position(event_id, lat, lng).await?;

    // The hints were suggestions toward the old position; recompute so
    // they reflect the now-authoritative one.
    hint_commands::sync_move_hints(state, event_id)
        .await
        .map_err(|err| ApplyError(err.to_string()))?;
    Ok(())
}

async fn apply_time_change(state: &AppState, request: &ChangeRequest) -> Result<(), ApplyError> {
    let event_id = request.event_id.ok_or_else(|| {
        ApplyError("report-time-change request has no event reference".to_string())
    })?;
    let event = state
        .event_repo
        .get(event_id)
        .await?
        .ok_or_else(|| ApplyError(format!("event {} not found", event_id)))?;

    let start_at = request.payload.start_at;
    let end_at = request.payload.end_at;
    let time_known = start_at.is_some() || end_at.is_some();

    let before = EventSnapshot::of(&event);
    let mut after = before.clone();
    after.start_at = start_at;
    after.end_at = end_at;
    after.time_known = time_known;
    state
        .history_repo
        .insert(&EventHistory {
            id: Uuid::new_v4(),
            event_id,
            reason: format!("times updated by approved request {}", request.id),
            before,
            after,
            created_at: state.clock.now_millis(),
        })
        .await?;

    state
        .event_repo
        .update_times(event_id, start_at, end_at, time_known)
        .await?;
    Ok(())
}
