//! Notification database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the `notifications` table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub recipient_id: i64,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub reference_user_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Notification left-joined with the referenced user and campaign names
#[derive(Debug, Clone, FromRow)]
pub struct NotificationViewModel {
    #[sqlx(flatten)]
    pub notification: NotificationModel,
    pub reference_user_name: Option<String>,
    pub reference_user_nickname: Option<String>,
    pub campaign_name: Option<String>,
}
