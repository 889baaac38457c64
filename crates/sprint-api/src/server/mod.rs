//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sprint_cache::{Publisher, RedisAuditNotifier, RedisPool};
use sprint_common::{AppConfig, AppError, JwtService};
use sprint_core::SnowflakeGenerator;
use sprint_db::{
    create_pool, run_migrations, PgAuditLogRepository, PgCommentRepository, PgProjectRepository,
    PgStatsRepository, PgTagRepository, PgTaskRepository, PgTimeEntryRepository, PgUserRepository,
};
use sprint_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    let api = apply_middleware_with_config(
        create_router(&state),
        &config.rate_limit,
        &config.cors,
        Duration::from_secs(config.api.request_timeout_secs),
        config.app.env.is_production(),
    );

    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = sprint_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let redis_pool = if config.redis.enabled {
        info!("Connecting to Redis...");
        let pool = RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
        Some(Arc::new(pool))
    } else {
        warn!("Redis disabled; audit notifications go to the log only");
        None
    };

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let snowflake_generator = Arc::new(
        SnowflakeGenerator::try_new(config.snowflake.machine_id)
            .map_err(|e| AppError::Validation(e.to_string()))?,
    );

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));

    let mut builder = ServiceContextBuilder::new()
        .user_repo(user_repo.clone())
        .project_repo(Arc::new(PgProjectRepository::new(pool.clone())))
        .task_repo(Arc::new(PgTaskRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .time_entry_repo(Arc::new(PgTimeEntryRepository::new(pool.clone())))
        .tag_repo(Arc::new(PgTagRepository::new(pool.clone())))
        .stats_repo(Arc::new(PgStatsRepository::new(pool.clone())))
        .audit_log_repo(Arc::new(PgAuditLogRepository::new(
            pool.clone(),
            snowflake_generator.clone(),
        )))
        .admin_directory(user_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator);

    if let Some(redis) = &redis_pool {
        let publisher = Publisher::new(redis.as_ref().clone());
        builder = builder.audit_notifier(Arc::new(RedisAuditNotifier::new(publisher)));
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("service context: {e}")))?;

    let state = AppState::new(service_context).with_database(pool);
    Ok(match redis_pool {
        Some(redis) => state.with_redis(redis),
        None => state,
    })
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(&config).await?;
    let app = create_app(state, &config);
    run_server(app, &addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
