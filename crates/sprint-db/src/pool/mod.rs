//! Database connection pool management

mod migrations;
mod postgres;

pub use migrations::{run_migrations, MigrationError};
pub use postgres::{create_pool, create_pool_from_env, DatabaseConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
