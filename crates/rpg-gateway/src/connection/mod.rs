//! Connection management
//!
//! Tracks live WebSocket connections and the rooms they have joined.

mod connection;
mod router;

pub use connection::{Connection, ConnectionState, Identity};
pub use router::ChannelRouter;
