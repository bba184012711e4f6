//! User entity - an account holder

use chrono::{DateTime, Utc};

/// A registered account.
///
/// The password hash and the stored refresh token live on the same row but
/// are only reachable through dedicated `UserRepository` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Public display name, unique across accounts
    pub display_name: String,
    pub nickname: String,
    pub email: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: i64, display_name: String, nickname: String, email: String) -> Self {
        Self {
            id,
            display_name,
            nickname,
            email,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    /// Name shown next to chat messages and presence lists
    pub fn label(&self) -> &str {
        if self.nickname.is_empty() {
            &self.display_name
        } else {
            &self.nickname
        }
    }
}

/// Values needed to register an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub display_name: String,
    pub nickname: String,
    pub email: String,
}
