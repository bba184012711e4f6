//! Chat database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the `chat_rooms` table
#[derive(Debug, Clone, FromRow)]
pub struct ChatRoomModel {
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Chat message joined with its author's names
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageModel {
    pub id: i64,
    pub room_id: i64,
    pub author_id: i64,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub author_name: String,
    pub author_nickname: String,
}
