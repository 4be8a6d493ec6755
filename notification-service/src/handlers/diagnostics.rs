use axum::{http::StatusCode, response::IntoResponse};
use service_core::error::AppError;
use service_core::middleware::RequestContext;

use crate::services::{get_metrics, record_error};

pub const INTENTIONAL_ERROR_MESSAGE: &str = "Intentional error for testing";

/// Always fails; exercises the error reporting path.
pub async fn intentional_error(ctx: RequestContext) -> Result<(), AppError> {
    tracing::error!(
        request_id = %ctx.request_id,
        trace_id = ctx.trace_id.as_deref().unwrap_or("-"),
        "Intentional error triggered"
    );

    let err = AppError::InternalError(anyhow::anyhow!(INTENTIONAL_ERROR_MESSAGE));
    record_error(err.kind());
    Err(err)
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
