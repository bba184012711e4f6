//! HTTP request handlers
//!
//! Each handler builds the matching service over the shared context.

pub mod campaigns;
pub mod chat;
pub mod health;
pub mod membership;
pub mod notifications;
pub mod session;
pub mod users;
