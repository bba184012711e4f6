//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in rpg-core.

mod campaign;
mod chat;
mod error;
mod join_request;
mod membership;
mod notification;
mod user;

pub use campaign::PgCampaignRepository;
pub use chat::PgChatRepository;
pub use join_request::PgJoinRequestRepository;
pub use membership::PgMembershipRepository;
pub use notification::PgNotificationRepository;
pub use user::PgUserRepository;
