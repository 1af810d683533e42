use tracing::info;
use uuid::Uuid;

use backend_domain::{
    dedupe_key, ChangeRequest, ChangeRequestStatus, ChangeRequestType, SubmitChangeRequest,
};

use crate::commands::report_commands::validate_position;
use crate::{AppError, AppState};

/// Structured change-proposal intake. Low-trust submissions are only
/// ever persisted Pending; application is an explicit reviewer action.
pub async fn submit_change_request(
    state: &AppState,
    mut submit: SubmitChangeRequest,
) -> Result<ChangeRequest, AppError> {
    let now = state.clock.now_millis();
    {
        // Check and record under one guard so a concurrent burst can
        // never admit more than the limit.
        let mut throttle = state.throttle.lock().await;
        if let Err(retry_after_seconds) = throttle.check(now) {
            state.metrics.record_throttled();
            return Err(AppError::Throttled {
                retry_after_seconds,
            });
        }
        throttle.record(now);
    }

    // Older create-event submissions carried the position beside the
    // payload instead of inside it; fold it in so the apply step always
    // sees one shape.
    if submit.request_type == ChangeRequestType::CreateEvent
        && submit.payload.lat.is_none()
        && submit.payload.lng.is_none()
    {
        if let Some(position) = validate_position(submit.lat, submit.lng)? {
            submit.payload.lat = Some(position.lat);
            submit.payload.lng = Some(position.lng);
        }
    }
    validate_position(submit.payload.lat, submit.payload.lng)?;

    let request = ChangeRequest {
        id: Uuid::new_v4(),
        request_type: submit.request_type,
        candidate_id: submit.candidate_id,
        event_id: submit.event_id,
        rival_event_id: submit.rival_event_id,
        dedupe_key: dedupe_key(
            submit.candidate_id,
            submit.payload.date.as_deref(),
            submit.payload.start_at,
            submit.payload.lat,
            submit.payload.lng,
        ),
        payload: submit.payload,
        status: ChangeRequestStatus::Pending,
        reviewer: None,
        reviewed_at: None,
        created_at: now,
    };

    state.request_repo.insert(&request).await?;
    state.metrics.record_request();
    info!(
        request_id = %request.id,
        request_type = request.request_type.as_str(),
        deduped = request.dedupe_key.is_some(),
        "change request accepted"
    );
    Ok(request)
}
