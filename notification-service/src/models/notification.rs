use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationStatus::Sent => write!(f, "sent"),
        }
    }
}

/// A stored row of the `notifications` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub recipient: String,
    pub message: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub notification_type: String,
    pub status: NotificationStatus,
    pub sent_at: DateTime<Utc>,
}

/// Input for recording a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient: String,
    pub message: String,
    pub notification_type: String,
    pub status: NotificationStatus,
    pub sent_at: DateTime<Utc>,
}

impl NewNotification {
    /// A notification marked as sent now.
    pub fn sent(recipient: String, message: String, notification_type: String) -> Self {
        Self {
            recipient,
            message,
            notification_type,
            status: NotificationStatus::Sent,
            sent_at: Utc::now(),
        }
    }
}

/// Body of `POST /notifications/send`.
///
/// Fields are optional at the serde level so that absent fields surface as
/// validation errors instead of opaque deserialization failures.
#[derive(Debug, Deserialize, Validate)]
pub struct SendNotificationRequest {
    #[validate(
        required(message = "recipient is required"),
        length(min = 1, message = "recipient cannot be empty")
    )]
    pub recipient: Option<String>,
    #[validate(
        required(message = "message is required"),
        length(min = 1, message = "message cannot be empty")
    )]
    pub message: Option<String>,
    #[serde(rename = "type")]
    #[validate(
        required(message = "type is required"),
        length(min = 1, message = "type cannot be empty")
    )]
    pub notification_type: Option<String>,
}

impl SendNotificationRequest {
    pub fn into_new_notification(self) -> Result<NewNotification, AppError> {
        self.validate()?;

        let missing = |field: &str| AppError::BadRequest(anyhow::anyhow!("{} is required", field));
        Ok(NewNotification::sent(
            self.recipient.ok_or_else(|| missing("recipient"))?,
            self.message.ok_or_else(|| missing("message"))?,
            self.notification_type.ok_or_else(|| missing("type"))?,
        ))
    }
}
