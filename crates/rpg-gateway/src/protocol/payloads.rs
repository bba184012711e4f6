//! Server payloads built by the gateway itself
//!
//! Notifications and chat messages are serialized by the service layer; only
//! presence is assembled here.

use serde::{Deserialize, Serialize};

/// One live user in a campaign room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUser {
    pub id: i64,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "apelido")]
    pub nickname: String,
}

/// `users_online` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersOnlinePayload {
    pub users: Vec<OnlineUser>,
}
