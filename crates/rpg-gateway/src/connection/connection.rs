//! Individual WebSocket connection
//!
//! Holds the identity bound at authentication, the rooms the connection has
//! joined and the sending half of its bounded outbound queue.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use rpg_core::Room;
use rpg_service::AuthenticatedUser;
use tokio::sync::mpsc;

use crate::protocol::{OnlineUser, SocketMessage};

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Upgraded, waiting for a token
    Connecting,
    /// Bound to a user
    Authenticated,
    /// Removed from every room
    Disconnected,
}

/// Who is on the other end, captured from the access-token claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub display_name: String,
    pub nickname: String,
}

impl From<&AuthenticatedUser> for Identity {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            user_id: user.id,
            display_name: user.claims.display_name.clone(),
            nickname: user.claims.nickname.clone(),
        }
    }
}

impl From<&Identity> for OnlineUser {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.user_id,
            display_name: identity.display_name.clone(),
            nickname: identity.nickname.clone(),
        }
    }
}

/// A single WebSocket connection
pub struct Connection {
    session_id: String,
    identity: RwLock<Option<Identity>>,
    state: RwLock<ConnectionState>,
    rooms: RwLock<HashSet<Room>>,
    sender: mpsc::Sender<SocketMessage>,
    last_seen: Mutex<Instant>,
    created_at: Instant,
}

impl Connection {
    pub fn new(session_id: String, sender: mpsc::Sender<SocketMessage>) -> Arc<Self> {
        let now = Instant::now();
        Arc::new(Self {
            session_id,
            identity: RwLock::new(None),
            state: RwLock::new(ConnectionState::Connecting),
            rooms: RwLock::new(HashSet::new()),
            sender,
            last_seen: Mutex::new(now),
            created_at: now,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.read().clone()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.identity.read().as_ref().map(|i| i.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.read().is_some()
    }

    /// Bind the connection to a user
    pub fn set_identity(&self, identity: Identity) {
        *self.identity.write() = Some(identity);
        self.set_state(ConnectionState::Authenticated);
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    pub fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
    }

    /// Record inbound activity
    pub fn touch(&self) {
        *self.last_seen.lock() = Instant::now();
    }

    /// Time since the last inbound frame
    pub fn idle_for(&self) -> Duration {
        self.last_seen.lock().elapsed()
    }

    /// Returns false when already in the room
    pub(crate) fn add_room(&self, room: Room) -> bool {
        self.rooms.write().insert(room)
    }

    /// Returns false when not in the room
    pub(crate) fn remove_room(&self, room: Room) -> bool {
        self.rooms.write().remove(&room)
    }

    pub(crate) fn take_rooms(&self) -> Vec<Room> {
        self.rooms.write().drain().collect()
    }

    pub fn rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.read().iter().copied().collect();
        rooms.sort_unstable();
        rooms
    }

    pub fn is_in(&self, room: Room) -> bool {
        self.rooms.read().contains(&room)
    }

    /// Queue a frame without waiting
    pub fn try_send(
        &self,
        message: SocketMessage,
    ) -> Result<(), mpsc::error::TrySendError<SocketMessage>> {
        self.sender.try_send(message)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id())
            .field("state", &self.state())
            .field("rooms", &self.rooms.read().len())
            .finish()
    }
}
