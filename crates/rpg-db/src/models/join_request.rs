//! Join request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct JoinRequestModel {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,
    pub message: Option<String>,
    /// 'pendente' or 'aceito'
    pub status: String,
    pub created_at: DateTime<Utc>,
}
