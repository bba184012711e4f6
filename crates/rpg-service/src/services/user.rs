//! User service
//!
//! Public user lookup and account deletion.

use rpg_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{FindUserResponse, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public record of a user, without credentials
    #[instrument(skip(self))]
    pub async fn find(&self, user_id: i64) -> ServiceResult<FindUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(FindUserResponse {
            message: "Usuario encontrado com sucesso".to_string(),
            user: UserResponse::from(&user),
        })
    }

    /// Delete the account. Memberships, join requests, received notifications,
    /// rooms and messages go with it through the foreign keys.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: i64) -> ServiceResult<()> {
        if !self.ctx.user_repo().delete(user_id).await? {
            return Err(DomainError::UserNotFound(user_id).into());
        }

        info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}
