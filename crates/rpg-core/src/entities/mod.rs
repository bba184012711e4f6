//! Domain entities - core business objects

mod campaign;
mod chat;
mod join_request;
mod membership;
mod notification;
mod user;

pub use campaign::{Campaign, CampaignChanges, CampaignSummary, NewCampaign, NextSession, Participant};
pub use chat::{ChatMessage, ChatMessageView, ChatRoom};
pub use join_request::{JoinRequest, JoinRequestStatus};
pub use membership::{CampaignRole, Membership};
pub use notification::{NewNotification, Notification, NotificationKind, NotificationView};
pub use user::{NewUser, User};
