//! HTTP handlers for notification-service.

pub mod diagnostics;
pub mod health;
pub mod notifications;

pub use diagnostics::{intentional_error, metrics_endpoint};
pub use health::{health_check, readiness_check, service_info};
pub use notifications::{list_notifications, send_notification};
