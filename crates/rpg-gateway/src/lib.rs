//! # rpg-gateway
//!
//! Realtime channel router and the WebSocket endpoint that feeds it.
//!
//! The [`ChannelRouter`] owns every live connection and room. It implements
//! [`rpg_core::RealtimeEmitter`], so the service layer pushes notifications
//! and chat messages through it without knowing about sockets.

pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use connection::{ChannelRouter, Connection, ConnectionState, Identity};
pub use protocol::{CloseCode, SocketMessage};
pub use server::{gateway_routes, GatewayState, SOCKET_PATH};
