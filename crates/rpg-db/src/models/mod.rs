//! Database models - SQLx-compatible structs for PostgreSQL tables

mod campaign;
mod chat;
mod join_request;
mod membership;
mod notification;
mod user;

pub use campaign::{CampaignModel, CampaignSummaryModel};
pub use chat::{ChatMessageModel, ChatRoomModel};
pub use join_request::JoinRequestModel;
pub use membership::{MembershipModel, ParticipantModel};
pub use notification::{NotificationModel, NotificationViewModel};
pub use user::UserModel;
