//! PostgreSQL implementation of AuditLogRepository
//!
//! The table is insert-only: this repository exposes no update or delete path.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::instrument;

use sprint_core::entities::{AuditRecord, NewAuditRecord};
use sprint_core::traits::{AuditLogQuery, AuditLogRepository, RepoResult};
use sprint_core::value_objects::{Snowflake, SnowflakeGenerator};

use crate::models::AuditLogModel;

use super::error::map_db_error;

const AUDIT_FILTER: &str = r"
    ($1::BIGINT IS NULL OR actor_id = $1)
    AND ($2::TEXT IS NULL OR entity_type = $2)
    AND ($3::BIGINT IS NULL OR entity_id = $3)
    AND ($4::TEXT IS NULL OR action = $4)
";

/// PostgreSQL implementation of AuditLogRepository
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgAuditLogRepository {
    /// Create a new PgAuditLogRepository minting ids from `ids`
    pub fn new(pool: PgPool, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, record), fields(action = %record.action, entity_type = %record.entity_type))]
    async fn append(&self, record: NewAuditRecord) -> RepoResult<AuditRecord> {
        let row = sqlx::query_as::<_, AuditLogModel>(
            r"
            INSERT INTO audit_logs (id, actor_id, action, entity_type, entity_id, before, after, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, actor_id, action, entity_type, entity_id, before, after, metadata, created_at
            ",
        )
        .bind(self.ids.generate().into_inner())
        .bind(record.actor_id.into_inner())
        .bind(record.action.as_str())
        .bind(record.entity_type.as_str())
        .bind(record.entity_id.map(Snowflake::into_inner))
        .bind(&record.before)
        .bind(&record.after)
        .bind(&record.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        AuditRecord::try_from(row)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AuditRecord>> {
        let result = sqlx::query_as::<_, AuditLogModel>(
            r"
            SELECT id, actor_id, action, entity_type, entity_id, before, after, metadata, created_at
            FROM audit_logs
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AuditRecord::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &AuditLogQuery) -> RepoResult<(Vec<AuditRecord>, i64)> {
        let actor_id = query.actor_id.map(Snowflake::into_inner);
        let entity_type = query.entity_type.map(|e| e.as_str());
        let entity_id = query.entity_id.map(Snowflake::into_inner);
        let action = query.action.map(|a| a.as_str());

        let rows = sqlx::query_as::<_, AuditLogModel>(&format!(
            r"
            SELECT id, actor_id, action, entity_type, entity_id, before, after, metadata, created_at
            FROM audit_logs
            WHERE {AUDIT_FILTER}
            ORDER BY created_at DESC, id DESC
            LIMIT $5 OFFSET $6
            "
        ))
        .bind(actor_id)
        .bind(entity_type)
        .bind(entity_id)
        .bind(action)
        .bind(query.page.limit)
        .bind(query.page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM audit_logs WHERE {AUDIT_FILTER}"
        ))
        .bind(actor_id)
        .bind(entity_type)
        .bind(entity_id)
        .bind(action)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let records = rows
            .into_iter()
            .map(AuditRecord::try_from)
            .collect::<RepoResult<Vec<_>>>()?;
        Ok((records, total))
    }
}
