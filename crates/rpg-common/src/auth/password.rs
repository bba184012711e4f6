//! Password hashing and verification utilities
//!
//! Uses Argon2id with a random salt. The `_async` variants move the work onto
//! tokio's blocking pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AppError, AppResult};

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash. The comparison is constant-time.
///
/// # Errors
/// Returns an error if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// [`hash_password`] on the blocking pool
///
/// # Errors
/// Returns an error if hashing fails or the blocking task panics
pub async fn hash_password_async(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
}

/// [`verify_password`] on the blocking pool
///
/// # Errors
/// Returns an error if the hash is malformed or the blocking task panics
pub async fn verify_password_async(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("segredo123").unwrap();

        assert!(hash.starts_with("$argon2id"));
        // Fresh salt every time
        assert_ne!(hash, hash_password("segredo123").unwrap());
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("segredo123").unwrap();

        assert!(verify_password("segredo123", &hash).unwrap());
        assert!(!verify_password("outra-senha", &hash).unwrap());
    }

    #[test]
    fn test_verify_malformed_hash() {
        let result = verify_password("segredo123", "not-a-phc-string");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let hash = hash_password_async("segredo123".to_string()).await.unwrap();

        assert!(verify_password_async("segredo123".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_async("errada".to_string(), hash).await.unwrap());
    }
}
