//! Startup schema for the `notifications` table.
//!
//! Every statement is create-if-absent, so running the initializer against an
//! existing database is a no-op.

use service_core::error::AppError;
use sqlx::SqlitePool;
use tracing::{info, instrument};

pub const CREATE_NOTIFICATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    recipient TEXT NOT NULL,
    message TEXT NOT NULL,
    type TEXT NOT NULL,
    status TEXT NOT NULL,
    sent_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

pub const CREATE_SENT_AT_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS notifications_sent_at_idx ON notifications (sent_at DESC)
"#;

/// Ensure the notifications table and its indexes exist.
#[instrument(skip(pool))]
pub async fn initialize(pool: &SqlitePool) -> Result<(), AppError> {
    info!("Initializing notifications schema");

    for statement in [CREATE_NOTIFICATIONS_TABLE, CREATE_SENT_AT_INDEX] {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            tracing::error!("Failed to initialize schema: {}", e);
            AppError::DatabaseError(anyhow::anyhow!("Schema initialization failed: {}", e))
        })?;
    }

    info!("Notifications schema ready");
    Ok(())
}
