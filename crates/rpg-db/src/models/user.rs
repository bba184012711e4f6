//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Public columns of the `users` table. Credentials are read separately.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub display_name: String,
    pub nickname: String,
    pub email: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
