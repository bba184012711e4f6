//! JWT utilities for authentication
//!
//! Access and refresh tokens are signed with separate secrets and carry a
//! `token_type` claim, so neither can stand in for the other.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use rpg_core::User;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims of a short-lived access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Numeric user id, read by the client as `decoded.id`
    pub id: i64,
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "apelido")]
    pub nickname: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
}

impl AccessClaims {
    /// Get the user ID
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.id
    }
}

/// Claims of a long-lived refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub id: i64,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Random id so two tokens minted in the same second still differ
    pub jti: String,
    pub token_type: TokenType,
}

impl RefreshClaims {
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.id
    }
}

/// Token pair returned at login and signup
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secrets and expiry times (seconds)
    #[must_use]
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.access_secret,
            &config.refresh_secret,
            config.access_token_expiry,
            config.refresh_token_expiry,
        )
    }

    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Issue an access and a refresh token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_pair(&self, user: &User) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user)?,
            refresh_token: self.issue_refresh_token(user.id)?,
        })
    }

    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            id: user.id,
            sub: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            nickname: user.nickname.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            token_type: TokenType::Access,
        };

        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_refresh_token(&self, user_id: i64) -> AppResult<String> {
        let now = Utc::now();
        let claims = RefreshClaims {
            id: user_id,
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.refresh_token_expiry)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Refresh,
        };

        encode(&Header::default(), &claims, &self.refresh_encoding)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// `TokenExpired` when only the expiry check fails, `InvalidToken` otherwise
    pub fn validate_access_token(&self, token: &str) -> AppResult<AccessClaims> {
        let claims: AccessClaims =
            decode_claims(token, &self.access_decoding).map_err(|kind| match kind {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// Validate a refresh token's signature, expiry and type
    ///
    /// # Errors
    /// Returns `InvalidRefreshToken` on any failure
    pub fn validate_refresh_token(&self, token: &str) -> AppResult<RefreshClaims> {
        let claims: RefreshClaims = decode_claims(token, &self.refresh_decoding)
            .map_err(|_| AppError::InvalidRefreshToken)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::InvalidRefreshToken);
        }

        Ok(claims)
    }
}

fn decode_claims<T: DeserializeOwned>(token: &str, key: &DecodingKey) -> Result<T, ErrorKind> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<T>(token, key, &validation)
        .map(|data| data.claims)
        .map_err(|e| e.into_kind())
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
