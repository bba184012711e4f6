//! Chat rooms and messages

use chrono::{DateTime, Utc};

/// A named, campaign-scoped chat room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// A message posted to a room. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: i64,
    pub room_id: i64,
    pub author_id: i64,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// A message joined with its author's names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessageView {
    pub message: ChatMessage,
    pub author_name: String,
    pub author_nickname: String,
}
