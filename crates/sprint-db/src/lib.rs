//! # sprint-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `sprint-core`. It handles:
//!
//! - Connection pool management and startup migrations
//! - Database models with SQLx `FromRow` derives
//! - Row to entity mappers
//! - Repository implementations, including the append-only audit log
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprint_db::pool::{create_pool, DatabaseConfig};
//! use sprint_db::repositories::PgTaskRepository;
//! use sprint_core::traits::EntityRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let tasks = PgTaskRepository::new(pool);
//!
//!     let task = tasks.find_by_id(42.into()).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, MigrationError, PgPool};
pub use repositories::{
    PgAuditLogRepository, PgCommentRepository, PgProjectRepository, PgStatsRepository,
    PgTagRepository, PgTaskRepository, PgTimeEntryRepository, PgUserRepository,
};
