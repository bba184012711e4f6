//! Client event handlers
//!
//! Routes each decoded client event to its handler. Room events are refused
//! with `NotAuthenticated` until the connection has an identity, and a second
//! `auth` with `AlreadyAuthenticated`.

mod auth;
mod error;
mod presence;
mod rooms;

pub use auth::AuthHandler;
pub use error::{HandlerError, HandlerResult};
pub use presence::PresenceHandler;
pub use rooms::RoomHandler;

use tracing::{debug, trace};

use crate::connection::Connection;
use crate::protocol::{ClientEvent, CloseCode, SocketMessage};
use crate::server::GatewayState;

/// Dispatch incoming client events to the matching handler
pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle one client frame. `Some(code)` ends the connection.
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Connection,
        message: &SocketMessage,
    ) -> HandlerResult<Option<CloseCode>> {
        let event = ClientEvent::decode(message);
        trace!(session_id = %connection.session_id(), event = ?event, "Client event");

        if let Some(code) = Self::gate(&event, connection.is_authenticated()) {
            debug!(
                session_id = %connection.session_id(),
                event = %message.event,
                close_code = code.as_u16(),
                "Event refused in this connection state"
            );
            return Ok(Some(code));
        }

        if let ClientEvent::Auth { token } = &event {
            AuthHandler::handle(state, connection, token.as_deref())?;
            return Ok(None);
        }

        // Unknown events from a connection that has not authenticated yet
        let Some(user_id) = connection.user_id() else {
            return Ok(None);
        };

        match event {
            ClientEvent::JoinUserRoom(Some(requested)) => {
                RoomHandler::join_inbox(state, connection, user_id, requested);
            }
            ClientEvent::JoinChatRoom(Some(room_id)) => {
                RoomHandler::join_chat(state, connection, user_id, room_id).await?;
            }
            ClientEvent::LeaveChatRoom(Some(room_id)) => {
                RoomHandler::leave_chat(state, connection, room_id);
            }
            ClientEvent::JoinCampaign(Some(campaign_id)) => {
                PresenceHandler::join(state, connection, user_id, campaign_id).await?;
            }
            ClientEvent::LeaveCampaign(Some(campaign_id)) => {
                PresenceHandler::leave(state, connection, campaign_id);
            }
            ClientEvent::Unknown(name) => {
                debug!(session_id = %connection.session_id(), event = %name, "Unknown event ignored");
            }
            _ => {
                debug!(
                    session_id = %connection.session_id(),
                    event = %message.event,
                    "Event without a usable id ignored"
                );
            }
        }
        Ok(None)
    }

    /// Close code for an event that arrives on a connection in this state,
    /// if any
    #[must_use]
    pub fn gate(event: &ClientEvent, authenticated: bool) -> Option<CloseCode> {
        match event {
            ClientEvent::Auth { .. } if authenticated => Some(CloseCode::AlreadyAuthenticated),
            ClientEvent::Auth { .. } | ClientEvent::Unknown(_) => None,
            _ if authenticated => None,
            _ => Some(CloseCode::NotAuthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_events_need_authentication() {
        for event in [
            ClientEvent::JoinUserRoom(Some(1)),
            ClientEvent::JoinChatRoom(Some(1)),
            ClientEvent::LeaveChatRoom(None),
            ClientEvent::JoinCampaign(Some(1)),
            ClientEvent::LeaveCampaign(Some(1)),
        ] {
            assert_eq!(
                EventDispatcher::gate(&event, false),
                Some(CloseCode::NotAuthenticated)
            );
            assert_eq!(EventDispatcher::gate(&event, true), None);
        }
    }

    #[test]
    fn test_auth_twice_is_rejected() {
        let auth = ClientEvent::Auth { token: None };
        assert_eq!(EventDispatcher::gate(&auth, false), None);
        assert_eq!(
            EventDispatcher::gate(&auth, true),
            Some(CloseCode::AlreadyAuthenticated)
        );
    }

    #[test]
    fn test_unknown_events_pass() {
        let unknown = ClientEvent::Unknown("digitando".to_string());
        assert_eq!(EventDispatcher::gate(&unknown, false), None);
    }
}
