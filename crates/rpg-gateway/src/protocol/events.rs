//! Client-to-server events

use rpg_service::dto::id_from_value;
use serde_json::Value;

use super::SocketMessage;

pub const AUTH: &str = "auth";
pub const JOIN_USER_ROOM: &str = "entrarSalaUsuario";
pub const JOIN_CHAT_ROOM: &str = "entrarSalaChat";
pub const LEAVE_CHAT_ROOM: &str = "sairSalaChat";
pub const JOIN_CAMPAIGN: &str = "join_campaign";
pub const LEAVE_CAMPAIGN: &str = "leave_campaign";

/// A decoded client event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Authenticate with an access token
    Auth { token: Option<String> },
    /// Join the caller's own inbox `user_<id>`
    JoinUserRoom(Option<i64>),
    /// Subscribe to `sala_<id>`
    JoinChatRoom(Option<i64>),
    /// Unsubscribe from `sala_<id>`
    LeaveChatRoom(Option<i64>),
    /// Enter `campaign_<id>` presence
    JoinCampaign(Option<i64>),
    /// Leave `campaign_<id>` presence
    LeaveCampaign(Option<i64>),
    /// Anything else; ignored
    Unknown(String),
}

impl ClientEvent {
    /// Decode an event. Ids may be numbers or numeric strings; an unusable id
    /// decodes as `None` and is left to the handler.
    #[must_use]
    pub fn decode(message: &SocketMessage) -> Self {
        let id = || id_from_value(&message.data);
        match message.event.as_str() {
            AUTH => Self::Auth {
                token: auth_token(&message.data),
            },
            JOIN_USER_ROOM => Self::JoinUserRoom(id()),
            JOIN_CHAT_ROOM => Self::JoinChatRoom(id()),
            LEAVE_CHAT_ROOM => Self::LeaveChatRoom(id()),
            JOIN_CAMPAIGN => Self::JoinCampaign(id()),
            LEAVE_CAMPAIGN => Self::LeaveCampaign(id()),
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// `{"token": "..."}` or a bare string, with an optional `Bearer ` prefix
fn auth_token(data: &Value) -> Option<String> {
    let raw = match data {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("token")?.as_str()?,
        _ => return None,
    };
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then(|| token.to_string())
}
