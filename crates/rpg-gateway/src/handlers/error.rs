//! Handler error types

use thiserror::Error;

use crate::protocol::CloseCode;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Token rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Already authenticated")]
    AlreadyAuthenticated,

    /// Repository or service failure while handling an event
    #[error("Service error: {0}")]
    Service(#[from] rpg_service::ServiceError),
}

impl HandlerError {
    /// Close code sent when this error ends the connection
    #[must_use]
    pub fn to_close_code(&self) -> CloseCode {
        match self {
            Self::AuthenticationFailed(_) => CloseCode::AuthenticationFailed,
            Self::AlreadyAuthenticated => CloseCode::AlreadyAuthenticated,
            Self::Service(_) => CloseCode::UnknownError,
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
