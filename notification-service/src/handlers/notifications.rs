use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use service_core::error::AppError;
use service_core::middleware::RequestContext;

use crate::models::{Notification, NotificationStatus, SendNotificationRequest};
use crate::services::{record_error, record_notification};
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct SendNotificationResponse {
    pub status: NotificationStatus,
    pub recipient: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListNotificationsResponse {
    pub notifications: Vec<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

#[tracing::instrument(skip(state, ctx, payload), fields(request_id = %ctx.request_id))]
pub async fn send_notification(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> Result<Json<SendNotificationResponse>, AppError> {
    let Json(request) = payload
        .map_err(|rejection| AppError::BadRequest(anyhow::anyhow!(rejection.body_text())))?;
    let new_notification = request.into_new_notification()?;

    tracing::info!(
        notification_type = %new_notification.notification_type,
        "Sending notification"
    );

    let notification = state.db.insert(&new_notification).await.map_err(|e| {
        record_error(e.kind());
        e
    })?;

    record_notification(&notification.notification_type);
    tracing::info!(id = notification.id, "Notification sent successfully");

    Ok(Json(SendNotificationResponse {
        status: notification.status,
        recipient: notification.recipient,
        notification_type: notification.notification_type,
        trace_id: ctx.trace_id,
    }))
}

#[tracing::instrument(skip(state, ctx), fields(request_id = %ctx.request_id))]
pub async fn list_notifications(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<ListNotificationsResponse>, AppError> {
    tracing::info!("Fetching all notifications");

    let notifications = state.db.list().await.map_err(|e| {
        record_error(e.kind());
        e
    })?;

    tracing::info!(count = notifications.len(), "Retrieved notifications");

    Ok(Json(ListNotificationsResponse {
        notifications,
        trace_id: ctx.trace_id,
    }))
}
