pub mod database;
pub mod metrics;
pub mod schema;

pub use database::NotificationDb;
pub use metrics::{get_metrics, init_metrics, record_error, record_notification};
