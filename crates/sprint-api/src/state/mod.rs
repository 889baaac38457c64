//! Application state
//!
//! Holds the shared state for the Axum application: the service context
//! and the backing pools the readiness check pings.

use std::sync::Arc;

use sprint_cache::RedisPool;
use sprint_common::JwtService;
use sprint_db::PgPool;
use sprint_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    db_pool: Option<PgPool>,
    redis_pool: Option<Arc<RedisPool>>,
}

impl AppState {
    /// State without backing pools; readiness reports the database as down
    pub fn new(service_context: ServiceContext) -> Self {
        Self {
            service_context: Arc::new(service_context),
            db_pool: None,
            redis_pool: None,
        }
    }

    pub fn with_database(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub fn with_redis(mut self, pool: Arc<RedisPool>) -> Self {
        self.redis_pool = Some(pool);
        self
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }

    pub fn db_pool(&self) -> Option<&PgPool> {
        self.db_pool.as_ref()
    }

    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("database", &self.db_pool.is_some())
            .field("redis", &self.redis_pool.is_some())
            .finish()
    }
}
