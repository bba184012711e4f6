//! Realtime fan-out port
//!
//! Services push live events through this trait without knowing how
//! connections are held. Delivery is best-effort: the return value is the
//! number of connections the event was queued for, and zero is not an error.

use serde_json::Value;

use crate::events::ServerEvent;
use crate::value_objects::Room;

pub trait RealtimeEmitter: Send + Sync {
    /// Deliver to every live connection in the user's inbox room
    fn emit_to_user(&self, user_id: i64, event: ServerEvent, payload: &Value) -> usize {
        self.emit_to_room(Room::user(user_id), event, payload)
    }

    /// Deliver to every live connection joined to `room`
    fn emit_to_room(&self, room: Room, event: ServerEvent, payload: &Value) -> usize;
}
