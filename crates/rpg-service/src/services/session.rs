//! Session service
//!
//! Handles signup, login, token refresh, logout and bearer authentication.
//! Each user has a single stored refresh token: every login or signup
//! overwrites it, so a second device's login invalidates the first.

use rpg_common::{hash_password_async, verify_password_async, AccessClaims, AppError};
use rpg_core::{DomainError, NewUser};
use tracing::{debug, info, instrument, warn};

use crate::dto::{
    LoginRequest, LoginResponse, ProfileResponse, RefreshResponse, RegisterRequest, RegisterResponse,
    SessionUserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Identity bound to a verified access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub claims: AccessClaims,
}

impl AuthenticatedUser {
    pub fn profile(&self) -> SessionUserResponse {
        SessionUserResponse::from_claims(self.id, &self.claims)
    }

    /// `{"message", "user"}` for the profile route
    pub fn profile_response(&self) -> ProfileResponse {
        ProfileResponse {
            message: "Acesso permitido".to_string(),
            user: self.profile(),
        }
    }
}

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and open a session for it
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        let display_name = request.display_name.trim().to_string();
        let nickname = request.nickname.trim().to_string();
        if display_name.is_empty() || nickname.is_empty() {
            return Err(ServiceError::validation("Name and nickname are required"));
        }

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().display_name_exists(&display_name).await? {
            return Err(DomainError::NameAlreadyExists.into());
        }

        let password_hash = hash_password_async(request.password).await?;

        // The unique constraints still decide a concurrent signup race
        let user = self
            .ctx
            .user_repo()
            .create(
                &NewUser {
                    display_name,
                    nickname,
                    email: request.email,
                },
                &password_hash,
            )
            .await?;

        let tokens = self.ctx.jwt_service().issue_pair(&user)?;
        self.ctx
            .user_repo()
            .set_refresh_token(user.id, &tokens.refresh_token)
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(RegisterResponse {
            message: "Cadastro realizado com sucesso".to_string(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password_async(request.password, password_hash).await? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let tokens = self.ctx.jwt_service().issue_pair(&user)?;
        self.ctx
            .user_repo()
            .set_refresh_token(user.id, &tokens.refresh_token)
            .await?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user: SessionUserResponse::from(&user),
        })
    }

    /// Mint a new access token from the stored refresh token.
    ///
    /// The refresh token itself is left in place.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<RefreshResponse> {
        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;
        let user_id = claims.user_id();

        let stored = self.ctx.user_repo().get_refresh_token(user_id).await?;
        if stored.as_deref() != Some(refresh_token) {
            warn!(user_id = %user_id, "Refresh rejected: token does not match the stored one");
            return Err(AppError::InvalidRefreshToken.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidRefreshToken))?;

        let access_token = self.ctx.jwt_service().issue_access_token(&user)?;

        info!(user_id = %user.id, "Access token refreshed");
        Ok(RefreshResponse { access_token })
    }

    /// Clear the stored refresh token. Unknown tokens are a no-op.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: &str) -> ServiceResult<()> {
        let cleared = self.ctx.user_repo().clear_refresh_token(refresh_token).await?;
        debug!(cleared, "Refresh token revoked");
        Ok(())
    }

    /// Verify a bearer access token
    pub fn authenticate(&self, token: &str) -> ServiceResult<AuthenticatedUser> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let id = claims.user_id();
        Ok(AuthenticatedUser { id, claims })
    }
}
