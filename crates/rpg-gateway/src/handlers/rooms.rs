//! Inbox and chat room subscriptions

use rpg_core::Room;
use rpg_service::ChatService;
use tracing::{debug, warn};

use super::HandlerResult;
use crate::connection::Connection;
use crate::server::GatewayState;

pub struct RoomHandler;

impl RoomHandler {
    /// `entrarSalaUsuario`: only the caller's own inbox may be joined
    pub fn join_inbox(state: &GatewayState, connection: &Connection, user_id: i64, requested: i64) {
        if requested != user_id {
            warn!(
                session_id = %connection.session_id(),
                user_id = %user_id,
                requested = %requested,
                "Refused to join another user's inbox"
            );
            return;
        }
        state.router().join(connection, Room::user(user_id));
    }

    /// `entrarSalaChat`: requires membership in the room's campaign
    pub async fn join_chat(
        state: &GatewayState,
        connection: &Connection,
        user_id: i64,
        room_id: i64,
    ) -> HandlerResult<()> {
        if !ChatService::new(state.services())
            .can_join_room(user_id, room_id)
            .await?
        {
            debug!(
                session_id = %connection.session_id(),
                user_id = %user_id,
                room_id = %room_id,
                "Chat room join refused"
            );
            return Ok(());
        }
        state.router().join(connection, Room::chat(room_id));
        Ok(())
    }

    /// `sairSalaChat`
    pub fn leave_chat(state: &GatewayState, connection: &Connection, room_id: i64) {
        state.router().leave(connection, Room::chat(room_id));
    }
}
