//! Realtime room keys
//!
//! A room is a broadcast group addressed by a logical key. The rendered names
//! (`user_<id>`, `campaign_<id>`, `sala_<id>`) are what clients see.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix for a user's inbox room
pub const USER_ROOM_PREFIX: &str = "user_";
/// Prefix for a campaign presence room
pub const CAMPAIGN_ROOM_PREFIX: &str = "campaign_";
/// Prefix for a chat room
pub const CHAT_ROOM_PREFIX: &str = "sala_";

/// A broadcast group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Room {
    /// All live connections of one user
    User(i64),
    /// Connections currently viewing a campaign
    Campaign(i64),
    /// Connections subscribed to a chat room
    Chat(i64),
}

impl Room {
    #[must_use]
    pub fn user(user_id: i64) -> Self {
        Self::User(user_id)
    }

    #[must_use]
    pub fn campaign(campaign_id: i64) -> Self {
        Self::Campaign(campaign_id)
    }

    #[must_use]
    pub fn chat(room_id: i64) -> Self {
        Self::Chat(room_id)
    }

    /// Rendered room name
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Campaign id when this is a campaign room
    pub fn campaign_id(&self) -> Option<i64> {
        match self {
            Self::Campaign(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "{USER_ROOM_PREFIX}{id}"),
            Self::Campaign(id) => write!(f, "{CAMPAIGN_ROOM_PREFIX}{id}"),
            Self::Chat(id) => write!(f, "{CHAT_ROOM_PREFIX}{id}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid room name: {0}")]
pub struct ParseRoomError(String);

impl FromStr for Room {
    type Err = ParseRoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_id = |id: &str| id.parse::<i64>().map_err(|_| ParseRoomError(s.to_string()));

        if let Some(id) = s.strip_prefix(USER_ROOM_PREFIX) {
            return parse_id(id).map(Self::User);
        }
        if let Some(id) = s.strip_prefix(CAMPAIGN_ROOM_PREFIX) {
            return parse_id(id).map(Self::Campaign);
        }
        if let Some(id) = s.strip_prefix(CHAT_ROOM_PREFIX) {
            return parse_id(id).map(Self::Chat);
        }
        Err(ParseRoomError(s.to_string()))
    }
}
