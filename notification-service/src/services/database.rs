//! SQLite storage for notification-service.

use crate::models::{NewNotification, Notification};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::schema;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

/// Connection pool wrapper owning the `notifications` table.
#[derive(Clone)]
pub struct NotificationDb {
    pool: SqlitePool,
}

impl NotificationDb {
    /// Open (creating if missing) the SQLite database at `database_url`.
    #[instrument(skip(database_url), fields(service = "notification-service"))]
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        info!(max_connections = max_connections, "Connecting to SQLite");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Invalid database url {}: {}",
                    database_url,
                    e
                ))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the notifications table if it does not exist yet.
    pub async fn initialize_schema(&self) -> Result<(), AppError> {
        schema::initialize(&self.pool).await
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Append a notification and return the stored row.
    #[instrument(skip(self, input), fields(notification_type = %input.notification_type))]
    pub async fn insert(&self, input: &NewNotification) -> Result<Notification, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert"])
            .start_timer();

        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (recipient, message, type, status, sent_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, recipient, message, type, status, sent_at
            "#,
        )
        .bind(&input.recipient)
        .bind(&input.message)
        .bind(&input.notification_type)
        .bind(input.status)
        .bind(input.sent_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert notification: {}", e);
            AppError::DatabaseError(anyhow::anyhow!("Failed to insert notification: {}", e))
        })?;

        timer.observe_duration();

        info!(id = notification.id, "Notification stored");

        Ok(notification)
    }

    /// All notifications, most recent first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Notification>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list"])
            .start_timer();

        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, recipient, message, type, status, sent_at
            FROM notifications
            ORDER BY sent_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {}", e);
            AppError::DatabaseError(anyhow::anyhow!("Failed to list notifications: {}", e))
        })?;

        timer.observe_duration();

        Ok(notifications)
    }
}
