use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

use backend_application::commands::sweep_commands::{self, SweepSummary};
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize_sweep;

/// Externally triggered sweep; the core never self-schedules.
pub async fn run_sweep(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SweepSummary>, HttpError> {
    if !authorize_sweep(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let summary = sweep_commands::run_auto_promotion(&state).await?;
    Ok(Json(summary))
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<AppState>) -> StatusCode {
    match state.event_repo.ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            error!("readiness probe failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.render_prometheus();
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        body,
    )
}
