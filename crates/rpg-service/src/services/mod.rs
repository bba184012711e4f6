//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and is cheap to construct.

mod campaign;
mod capability;
mod chat;
mod context;
mod error;
mod membership;
mod notification;
mod session;
mod user;

pub use campaign::CampaignService;
pub use capability::CapabilityService;
pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use membership::MembershipService;
pub use notification::NotificationService;
pub use session::{AuthenticatedUser, SessionService};
pub use user::UserService;
