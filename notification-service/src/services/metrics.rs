//! Metrics collection for notification-service.
//!
//! HTTP request metrics flow through the `metrics` facade into the Prometheus
//! recorder; service counters live in a dedicated `prometheus` registry. Both
//! are rendered together at `/metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub static PROMETHEUS_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Notifications recorded, by notification type.
pub static NOTIFICATION_SENT_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "notification_sent_total",
            "Total notifications recorded by type",
        ),
        &["type"],
    )
    .expect("Failed to create notification_sent_total metric");
    PROMETHEUS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect("Failed to register notification_sent_total");
    counter
});

/// Error counter for alerting.
pub static NOTIFICATION_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "notification_errors_total",
            "Total number of errors by type",
        ),
        &["error_type"],
    )
    .expect("Failed to create notification_errors_total metric");
    PROMETHEUS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect("Failed to register notification_errors_total");
    counter
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    let histogram = HistogramVec::new(
        HistogramOpts::new(
            "notification_db_query_duration_seconds",
            "Database query duration in seconds",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["operation"],
    )
    .expect("Failed to create db_query_duration metric");
    PROMETHEUS_REGISTRY
        .register(Box::new(histogram.clone()))
        .expect("Failed to register db_query_duration");
    histogram
});

/// Install the Prometheus recorder behind the `metrics` facade.
///
/// Safe to call more than once; only the first call installs the recorder.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    });

    Lazy::force(&NOTIFICATION_SENT_TOTAL);
    Lazy::force(&NOTIFICATION_ERRORS_TOTAL);
    Lazy::force(&DB_QUERY_DURATION);
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    let encoder = TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).ok();
    if let Ok(custom_metrics) = String::from_utf8(buffer) {
        output.push_str(&custom_metrics);
    }

    output
}

/// Record a stored notification.
pub fn record_notification(notification_type: &str) {
    NOTIFICATION_SENT_TOTAL
        .with_label_values(&[notification_type])
        .inc();
}

/// Record a failed request by error kind.
pub fn record_error(error_type: &str) {
    NOTIFICATION_ERRORS_TOTAL
        .with_label_values(&[error_type])
        .inc();
}
