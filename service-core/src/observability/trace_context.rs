//! W3C Trace Context helpers.
//!
//! Reads the trace id of the span currently being recorded and extracts
//! correlation headers from incoming requests.
//!
//! See: https://www.w3.org/TR/trace-context/

use axum::http::HeaderMap;
use opentelemetry::trace::TraceContextExt;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Header name for W3C traceparent
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// Header name for request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Trace id of the current span, as 32 lowercase hex digits.
///
/// Returns `None` when no OpenTelemetry layer is installed or the current
/// span is not sampled into a valid trace.
pub fn current_trace_id() -> Option<String> {
    let context = Span::current().context();
    let otel_span = context.span();
    let span_context = otel_span.span_context();

    span_context
        .is_valid()
        .then(|| span_context.trace_id().to_string())
}

/// Extract trace context from incoming request headers.
pub fn extract_traceparent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(TRACEPARENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Extract request ID from incoming request headers.
pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
