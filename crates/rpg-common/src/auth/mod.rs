//! Authentication utilities: session tokens and password hashing

mod jwt;
mod password;

pub use jwt::{AccessClaims, JwtService, RefreshClaims, TokenPair, TokenType};
pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};
