//! Authentication extractor
//!
//! Verifies the `Authorization: Bearer` access token. A missing header, an
//! expired token and a malformed token each get their own error code.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use rpg_common::AppError;
use rpg_service::{AuthenticatedUser, SessionService};

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identity from a verified access token
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        ApiError::App(AppError::TokenMissing)
                    } else {
                        ApiError::App(AppError::InvalidToken)
                    }
                })?;

        let app_state = AppState::from_ref(state);
        let user = SessionService::new(app_state.service_context())
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                ApiError::Service(e)
            })?;

        Ok(AuthUser(user))
    }
}
