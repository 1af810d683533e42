use axum::Router;

use backend_application::AppState;

use crate::handlers::{moderation_handlers, ops_handlers, report_handlers, request_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/reports",
            axum::routing::post(report_handlers::submit_report),
        )
        .route(
            "/v1/requests",
            axum::routing::post(request_handlers::submit_change_request),
        )
        .route(
            "/v1/moderation/resolve",
            axum::routing::post(moderation_handlers::resolve_requests),
        )
        .route(
            "/v1/ops/sweep",
            axum::routing::post(ops_handlers::run_sweep),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
