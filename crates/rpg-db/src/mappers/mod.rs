//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions. Enum columns are guarded by CHECK
//! constraints; an unexpected value falls back to the least privileged variant.

mod campaign;
mod chat;
mod join_request;
mod membership;
mod notification;
mod user;

pub(crate) use membership::parse_role;
