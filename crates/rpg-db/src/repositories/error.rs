//! Error handling utilities for repositories

use rpg_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Map a unique or foreign-key violation by constraint name.
///
/// The closure returns `None` for constraints it does not recognize, which
/// then fall back to a plain database error.
pub fn map_constraint_violation<F>(e: SqlxError, on_violation: F) -> DomainError
where
    F: FnOnce(&str) -> Option<DomainError>,
{
    let mapped = e.as_database_error().and_then(|db_err| {
        if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
            db_err.constraint().and_then(on_violation)
        } else {
            None
        }
    });

    mapped.unwrap_or_else(|| map_db_error(e))
}
