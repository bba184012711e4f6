//! Socket frame format
//!
//! Every frame in either direction is a JSON text frame
//! `{"event": <name>, "data": <json>}`.

use rpg_core::ServerEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named event with its JSON payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketMessage {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl SocketMessage {
    #[must_use]
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Server push for a [`ServerEvent`]
    #[must_use]
    pub fn server(event: ServerEvent, data: Value) -> Self {
        Self::new(event.name(), data)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for SocketMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SocketMessage(event={})", self.event)
    }
}
