//! Ports - traits implemented by the infrastructure crates

mod realtime;
mod repositories;

pub use realtime::RealtimeEmitter;
pub use repositories::{
    CampaignRepository, ChatRepository, JoinRequestRepository, MembershipRepository,
    NotificationRepository, RepoResult, UserRepository,
};
