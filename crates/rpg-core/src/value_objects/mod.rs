//! Value objects - immutable types that represent domain concepts

mod role_set;
mod room;

pub use role_set::RoleSet;
pub use room::{ParseRoomError, Room};
