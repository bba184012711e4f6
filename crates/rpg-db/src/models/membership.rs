//! Membership database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the `campaign_members` table
#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub user_id: i64,
    pub campaign_id: i64,
    /// 'admin', 'mestre', 'dm-assistant' or 'jogador'
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Membership joined with the member's user row
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantModel {
    pub campaign_id: i64,
    pub user_id: i64,
    pub display_name: String,
    pub nickname: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: String,
}
