use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use backend_application::commands::request_commands;
use backend_application::AppState;
use backend_domain::SubmitChangeRequest;

use crate::error::HttpError;

#[derive(Serialize)]
pub struct ChangeRequestAccepted {
    pub id: Uuid,
    pub request_type: String,
    pub status: String,
}

pub async fn submit_change_request(
    State(state): State<AppState>,
    Json(payload): Json<SubmitChangeRequest>,
) -> Result<(StatusCode, Json<ChangeRequestAccepted>), HttpError> {
    let request = request_commands::submit_change_request(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ChangeRequestAccepted {
            id: request.id,
            request_type: request.request_type.as_str().to_string(),
            status: request.status.as_str().to_string(),
        }),
    ))
}
