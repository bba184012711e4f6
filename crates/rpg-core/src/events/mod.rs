//! Realtime events pushed from the server to connected clients

mod server_event;

pub use server_event::ServerEvent;
