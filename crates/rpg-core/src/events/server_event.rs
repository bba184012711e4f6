//! Server-to-client event names

use serde::{Serialize, Serializer};
use std::fmt;

/// Events the server pushes over a realtime connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerEvent {
    /// A notification was stored for the receiving user
    NewNotification,
    /// A message was posted to a chat room
    NewMessage,
    /// Presence snapshot of a campaign room
    UsersOnline,
}

impl ServerEvent {
    /// Wire name of the event
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewNotification => "novaNotificacao",
            Self::NewMessage => "novaMensagem",
            Self::UsersOnline => "users_online",
        }
    }
}

impl fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ServerEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(ServerEvent::NewNotification.name(), "novaNotificacao");
        assert_eq!(ServerEvent::NewMessage.to_string(), "novaMensagem");
        assert_eq!(
            serde_json::to_string(&ServerEvent::UsersOnline).unwrap(),
            "\"users_online\""
        );
    }
}
