use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use backend_application::commands::report_commands;
use backend_application::AppState;
use backend_domain::SubmitReportRequest;

use crate::error::HttpError;
use crate::middleware::reporter_context;

#[derive(Serialize)]
pub struct ReportAccepted {
    pub id: Uuid,
    pub event_id: Uuid,
    pub kind: String,
}

pub async fn submit_report(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<SubmitReportRequest>,
) -> Result<(StatusCode, Json<ReportAccepted>), HttpError> {
    let reporter = reporter_context(&headers, peer);
    let report = report_commands::submit_report(&state, payload, &reporter).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReportAccepted {
            id: report.id,
            event_id: report.event_id,
            kind: report.kind.as_str().to_string(),
        }),
    ))
}
