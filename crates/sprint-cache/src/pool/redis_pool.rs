//! Redis connection pool backing audit notification delivery.

use deadpool_redis::{Config, Pool, Runtime};
use sprint_common::RedisConfig;

#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Redis is disabled")]
    Disabled,

    #[error("Failed to build Redis pool: {0}")]
    Build(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Event encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Shared deadpool of Redis connections; cheap to clone
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("max_size", &self.pool.status().max_size)
            .finish()
    }
}

impl RedisPool {
    /// Build the pool described by `config`; a disabled config builds nothing
    pub fn from_config(config: &RedisConfig) -> RedisResult<Self> {
        if !config.enabled {
            return Err(RedisPoolError::Disabled);
        }

        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?
            .max_size(config.max_connections as usize)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?;

        tracing::info!(
            host = %redacted(&config.url),
            max_connections = config.max_connections,
            "Redis pool ready"
        );

        Ok(Self { pool })
    }

    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    /// Round-trip a PING for the readiness check
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}

/// The URL without any `user:password@` part
fn redacted(url: &str) -> &str {
    url.rsplit('@').next().unwrap_or(url)
}
