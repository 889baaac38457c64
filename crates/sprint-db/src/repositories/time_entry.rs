//! PostgreSQL implementation of TimeEntryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use sprint_core::entities::TimeEntry;
use sprint_core::error::DomainError;
use sprint_core::traits::{EntityRepository, RepoResult, TimeEntryQuery, TimeEntryRepository};
use sprint_core::value_objects::Snowflake;

use crate::models::TimeEntryModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of TimeEntryRepository
#[derive(Clone)]
pub struct PgTimeEntryRepository {
    pool: PgPool,
}

impl PgTimeEntryRepository {
    /// Create a new PgTimeEntryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<TimeEntry> for PgTimeEntryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TimeEntry>> {
        let result = sqlx::query_as::<_, TimeEntryModel>(
            r"
            SELECT id, task_id, user_id, minutes, start_time, end_time, notes, created_at
            FROM time_entries
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(TimeEntry::from))
    }
}

#[async_trait]
impl TimeEntryRepository for PgTimeEntryRepository {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id))]
    async fn create(&self, entry: &TimeEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO time_entries (id, task_id, user_id, minutes, start_time, end_time, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.task_id.into_inner())
        .bind(entry.user_id.into_inner())
        .bind(entry.minutes)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(&entry.notes)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::TaskNotFound(entry.task_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TimeEntryNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &TimeEntryQuery) -> RepoResult<Vec<TimeEntry>> {
        let results = sqlx::query_as::<_, TimeEntryModel>(
            r"
            SELECT id, task_id, user_id, minutes, start_time, end_time, notes, created_at
            FROM time_entries
            WHERE ($1::BIGINT IS NULL OR task_id = $1)
              AND ($2::BIGINT IS NULL OR user_id = $2)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(query.task_id.map(Snowflake::into_inner))
        .bind(query.user_id.map(Snowflake::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TimeEntry::from).collect())
    }
}
