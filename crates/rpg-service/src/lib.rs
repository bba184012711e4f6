//! # rpg-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthenticatedUser, CampaignService, CapabilityService, ChatService, MembershipService,
    NotificationService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SessionService, UserService,
};

#[cfg(test)]
pub(crate) mod testing;
