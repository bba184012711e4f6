//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Campaign not found: {0}")]
    CampaignNotFound(i64),

    #[error("Chat room not found: {0}")]
    RoomNotFound(i64),

    #[error("Notification not found: {0}")]
    NotificationNotFound(i64),

    #[error("Join request not found")]
    JoinRequestNotFound,

    #[error("User is not a member of this campaign")]
    MemberNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Nothing to update")]
    NothingToUpdate,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Insufficient campaign role")]
    InsufficientRole,

    #[error("Notification belongs to another user")]
    NotRecipient,

    #[error("Acting user does not match the authenticated user")]
    UserMismatch,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Display name already in use")]
    NameAlreadyExists,

    #[error("Already a member of this campaign")]
    AlreadyMember,

    #[error("A join request is already pending")]
    JoinRequestPending,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CampaignNotFound(_) => "UNKNOWN_CAMPAIGN",
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::JoinRequestNotFound => "UNKNOWN_JOIN_REQUEST",
            Self::MemberNotFound => "UNKNOWN_MEMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NothingToUpdate => "NOTHING_TO_UPDATE",

            // Authorization
            Self::InsufficientRole => "FORBIDDEN",
            Self::NotRecipient => "NOT_RECIPIENT",
            Self::UserMismatch => "USER_MISMATCH",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::NameAlreadyExists => "NAME_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::JoinRequestPending => "JOIN_REQUEST_PENDING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CampaignNotFound(_)
                | Self::RoomNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::JoinRequestNotFound
                | Self::MemberNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::NothingToUpdate)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::InsufficientRole | Self::NotRecipient | Self::UserMismatch
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::NameAlreadyExists
                | Self::AlreadyMember
                | Self::JoinRequestPending
        )
    }
}
