//! # rpg-db
//!
//! PostgreSQL adapters for the repository traits in `rpg-core`, built on SQLx.
//!
//! - Connection pool management and SQL migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use rpg_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! run_migrations(&pool).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool, MIGRATIONS_DIR};
pub use repositories::{
    PgCampaignRepository, PgChatRepository, PgJoinRequestRepository, PgMembershipRepository,
    PgNotificationRepository, PgUserRepository,
};
