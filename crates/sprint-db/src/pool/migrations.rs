//! Schema migrations applied at startup

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to load migrations from {dir}: {source}")]
    Load {
        dir: String,
        #[source]
        source: MigrateError,
    },

    #[error("failed to apply migrations: {0}")]
    Apply(#[from] MigrateError),
}

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: &str) -> Result<(), MigrationError> {
    let migrator = Migrator::new(Path::new(dir))
        .await
        .map_err(|source| MigrationError::Load {
            dir: dir.to_string(),
            source,
        })?;

    info!(dir, count = migrator.iter().count(), "Applying database migrations");
    migrator.run(pool).await?;
    Ok(())
}
