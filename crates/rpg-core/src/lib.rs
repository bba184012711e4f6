//! # rpg-core
//!
//! Domain layer for VirtualRPG: entities, value objects, repository traits,
//! the realtime emitter port, and realtime event names.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Campaign, CampaignChanges, CampaignRole, CampaignSummary, ChatMessage, ChatMessageView,
    ChatRoom, JoinRequest, JoinRequestStatus, Membership, NewCampaign, NewNotification,
    NewUser, NextSession, Notification, NotificationKind, NotificationView, Participant, User,
};
pub use error::DomainError;
pub use events::ServerEvent;
pub use traits::{
    CampaignRepository, ChatRepository, JoinRequestRepository, MembershipRepository,
    NotificationRepository, RealtimeEmitter, RepoResult, UserRepository,
};
pub use value_objects::{ParseRoomError, RoleSet, Room};
