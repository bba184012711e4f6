//! Campaign presence rooms
//!
//! Joining or leaving `campaign_<id>` re-broadcasts `users_online` to
//! everyone left in the room.

use rpg_core::{RoleSet, Room};
use rpg_service::CapabilityService;
use tracing::debug;

use super::HandlerResult;
use crate::connection::Connection;
use crate::server::GatewayState;

pub struct PresenceHandler;

impl PresenceHandler {
    /// `join_campaign`: members only
    pub async fn join(
        state: &GatewayState,
        connection: &Connection,
        user_id: i64,
        campaign_id: i64,
    ) -> HandlerResult<()> {
        let member = CapabilityService::new(state.services())
            .has_capability(user_id, campaign_id, RoleSet::MEMBERS)
            .await?;
        if !member {
            debug!(
                session_id = %connection.session_id(),
                user_id = %user_id,
                campaign_id = %campaign_id,
                "Presence join refused"
            );
            return Ok(());
        }

        state.router().join(connection, Room::campaign(campaign_id));
        state.router().broadcast_presence(campaign_id);
        Ok(())
    }

    /// `leave_campaign`
    pub fn leave(state: &GatewayState, connection: &Connection, campaign_id: i64) {
        if state.router().leave(connection, Room::campaign(campaign_id)) {
            state.router().broadcast_presence(campaign_id);
        }
    }
}
