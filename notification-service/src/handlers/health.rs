use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;
use service_core::middleware::RequestContext;

use crate::startup::AppState;

pub const SERVICE_NAME: &str = "notification-service";

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Service identity.
pub async fn service_info(ctx: RequestContext) -> Json<ServiceInfo> {
    tracing::info!(request_id = %ctx.request_id, "Service root endpoint called");

    Json(ServiceInfo {
        service: SERVICE_NAME,
        status: "running",
        trace_id: ctx.trace_id,
    })
}

/// Liveness probe. Does not touch storage.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Readiness probe: storage must answer.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::error!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
