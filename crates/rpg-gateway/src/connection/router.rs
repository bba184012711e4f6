//! Realtime channel router
//!
//! Maps live connections to rooms and fans events out to a room's members.
//! All state is instance-owned and held in `DashMap`s, so join, leave and
//! emit may run concurrently from any task.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use rpg_core::{RealtimeEmitter, Room, ServerEvent};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, trace};
use uuid::Uuid;

use super::{Connection, ConnectionState, Identity};
use crate::protocol::{OnlineUser, SocketMessage, UsersOnlinePayload};

/// Room registry and fan-out
pub struct ChannelRouter {
    /// Live connections by session id
    connections: DashMap<String, Arc<Connection>>,

    /// Room to session ids
    rooms: DashMap<Room, HashSet<String>>,
}

impl ChannelRouter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a freshly upgraded connection
    pub fn register(&self, sender: mpsc::Sender<SocketMessage>) -> Arc<Connection> {
        let session_id = Uuid::new_v4().simple().to_string();
        let connection = Connection::new(session_id.clone(), sender);
        self.connections.insert(session_id.clone(), connection.clone());

        debug!(session_id = %session_id, "Connection registered");
        connection
    }

    /// Bind a connection to the identity from its access token
    pub fn authenticate(&self, connection: &Connection, identity: Identity) {
        debug!(
            session_id = %connection.session_id(),
            user_id = %identity.user_id,
            "Connection authenticated"
        );
        connection.set_identity(identity);
    }

    /// Add a connection to a room. Returns false if it was already there.
    pub fn join(&self, connection: &Connection, room: Room) -> bool {
        if !self.connections.contains_key(connection.session_id()) {
            return false;
        }
        let added = connection.add_room(room);
        self.rooms
            .entry(room)
            .or_default()
            .insert(connection.session_id().to_string());

        trace!(session_id = %connection.session_id(), room = %room, "Joined room");
        added
    }

    /// Remove a connection from a room. Returns false if it was not there.
    pub fn leave(&self, connection: &Connection, room: Room) -> bool {
        let removed = connection.remove_room(room);
        self.detach(connection.session_id(), room);

        trace!(session_id = %connection.session_id(), room = %room, "Left room");
        removed
    }

    fn detach(&self, session_id: &str, room: Room) {
        if let Some(mut sessions) = self.rooms.get_mut(&room) {
            sessions.remove(session_id);
        }
        self.rooms.remove_if(&room, |_, sessions| sessions.is_empty());
    }

    /// Drop a connection from every room, then refresh presence in each
    /// campaign room it held. Returns those campaign ids.
    pub fn disconnect(&self, session_id: &str) -> Vec<i64> {
        let Some((_, connection)) = self.connections.remove(session_id) else {
            return Vec::new();
        };
        connection.set_state(ConnectionState::Disconnected);

        let mut campaigns = Vec::new();
        for room in connection.take_rooms() {
            self.detach(session_id, room);
            if let Some(campaign_id) = room.campaign_id() {
                campaigns.push(campaign_id);
            }
        }

        campaigns.sort_unstable();
        for campaign_id in &campaigns {
            self.broadcast_presence(*campaign_id);
        }

        debug!(session_id = %session_id, campaigns = campaigns.len(), "Connection removed");
        campaigns
    }

    /// Live connections joined to a room
    pub fn room_connections(&self, room: Room) -> Vec<Arc<Connection>> {
        self.rooms
            .get(&room)
            .map(|sessions| {
                sessions
                    .iter()
                    .filter_map(|sid| self.connections.get(sid).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Users with a live connection in `campaign_<id>`, one entry per user,
    /// ordered by id
    pub fn list_online(&self, campaign_id: i64) -> Vec<OnlineUser> {
        let mut users = BTreeMap::new();
        for connection in self.room_connections(Room::campaign(campaign_id)) {
            if let Some(identity) = connection.identity() {
                users
                    .entry(identity.user_id)
                    .or_insert_with(|| OnlineUser::from(&identity));
            }
        }
        users.into_values().collect()
    }

    /// Push `users_online` to everyone in the campaign room
    pub fn broadcast_presence(&self, campaign_id: i64) -> usize {
        let payload = UsersOnlinePayload {
            users: self.list_online(campaign_id),
        };
        match serde_json::to_value(&payload) {
            Ok(value) => {
                self.emit_to_room(Room::campaign(campaign_id), ServerEvent::UsersOnline, &value)
            }
            Err(e) => {
                debug!(error = %e, "Failed to encode presence");
                0
            }
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of rooms with at least one member
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_size(&self, room: Room) -> usize {
        self.rooms.get(&room).map_or(0, |sessions| sessions.len())
    }
}

impl RealtimeEmitter for ChannelRouter {
    fn emit_to_room(&self, room: Room, event: ServerEvent, payload: &Value) -> usize {
        let mut delivered = 0;
        for connection in self.room_connections(room) {
            match connection.try_send(SocketMessage::server(event, payload.clone())) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    debug!(
                        session_id = %connection.session_id(),
                        event = %event,
                        "Outbound queue full, event dropped"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(
                        session_id = %connection.session_id(),
                        event = %event,
                        "Connection closed, event dropped"
                    );
                }
            }
        }

        trace!(room = %room, event = %event, delivered, "Event emitted");
        delivered
    }
}

impl Default for ChannelRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChannelRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelRouter")
            .field("connections", &self.connections.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
