use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::moderation_commands::{self, ResolveOutcome};
use backend_application::AppState;
use backend_domain::ResolveRequestsRequest;

use crate::error::HttpError;
use crate::middleware::authorize_staff;

pub async fn resolve_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ResolveRequestsRequest>,
) -> Result<Json<ResolveOutcome>, HttpError> {
    if !authorize_staff(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    if payload.ids.is_empty() {
        return Err(HttpError::BadRequest("ids must not be empty".to_string()));
    }
    let reviewer = reviewer_name(&headers);
    let outcome =
        moderation_commands::resolve_requests(&state, &payload.ids, payload.action, &reviewer)
            .await?;
    Ok(Json(outcome))
}

/// The shared staff token does not identify reviewers; deployments that
/// care send X-Reviewer from the moderation UI.
fn reviewer_name(headers: &HeaderMap) -> String {
    headers
        .get("X-Reviewer")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("staff")
        .to_string()
}
