//! Socket protocol
//!
//! Frame format, client event names, server payloads and close codes.

mod close_codes;
pub mod events;
mod messages;
mod payloads;

pub use close_codes::CloseCode;
pub use events::ClientEvent;
pub use messages::SocketMessage;
pub use payloads::{OnlineUser, UsersOnlinePayload};
