//! Integration test utilities for the VirtualRPG server
//!
//! Helpers for running end-to-end tests against the REST API and the
//! realtime socket.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
