//! PostgreSQL implementation of TaskRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use sprint_core::entities::Task;
use sprint_core::error::DomainError;
use sprint_core::traits::{EntityRepository, RepoResult, TaskQuery, TaskRepository};
use sprint_core::value_objects::Snowflake;

use crate::mappers::raw_ids;
use crate::models::TaskModel;

use super::error::map_db_error;

const TASK_FILTER: &str = r"
    ($1::TEXT IS NULL OR status = $1)
    AND ($2::BIGINT IS NULL OR project_id = $2)
    AND ($3::BIGINT IS NULL OR assigned_to = $3)
    AND ($4::TEXT IS NULL OR title ILIKE '%' || $4 || '%')
";

/// PostgreSQL implementation of TaskRepository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Task> for PgTaskRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Task>> {
        let result = sqlx::query_as::<_, TaskModel>(
            r"
            SELECT id, title, description, status, total_minutes, project_id, assigned_to,
                   created_by, tag_ids, created_at, updated_at
            FROM tasks
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Task::try_from).transpose()
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    #[instrument(skip(self, task), fields(task_id = %task.id))]
    async fn create(&self, task: &Task) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO tasks (id, title, description, status, total_minutes, project_id,
                               assigned_to, created_by, tag_ids, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(task.id.into_inner())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.total_minutes)
        .bind(task.project_id.map(Snowflake::into_inner))
        .bind(task.assigned_to.map(Snowflake::into_inner))
        .bind(task.created_by.into_inner())
        .bind(raw_ids(&task.tag_ids))
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, task), fields(task_id = %task.id))]
    async fn update(&self, task: &Task) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE tasks
            SET title = $2, description = $3, status = $4, total_minutes = $5,
                project_id = $6, assigned_to = $7, tag_ids = $8, updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(task.id.into_inner())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.total_minutes)
        .bind(task.project_id.map(Snowflake::into_inner))
        .bind(task.assigned_to.map(Snowflake::into_inner))
        .bind(raw_ids(&task.tag_ids))
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(task.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &TaskQuery) -> RepoResult<(Vec<Task>, i64)> {
        let status = query.status.map(|s| s.as_str());
        let project_id = query.project_id.map(Snowflake::into_inner);
        let assigned_to = query.assigned_to.map(Snowflake::into_inner);
        let title = query.title.as_deref();

        let rows = sqlx::query_as::<_, TaskModel>(&format!(
            r"
            SELECT id, title, description, status, total_minutes, project_id, assigned_to,
                   created_by, tag_ids, created_at, updated_at
            FROM tasks
            WHERE {TASK_FILTER}
            ORDER BY created_at DESC, id DESC
            LIMIT $5 OFFSET $6
            "
        ))
        .bind(status)
        .bind(project_id)
        .bind(assigned_to)
        .bind(title)
        .bind(query.page.limit)
        .bind(query.page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM tasks WHERE {TASK_FILTER}"
        ))
        .bind(status)
        .bind(project_id)
        .bind(assigned_to)
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let tasks = rows
            .into_iter()
            .map(Task::try_from)
            .collect::<RepoResult<Vec<_>>>()?;
        Ok((tasks, total))
    }

    #[instrument(skip(self))]
    async fn adjust_minutes(&self, id: Snowflake, delta: i32) -> RepoResult<Option<Task>> {
        let result = sqlx::query_as::<_, TaskModel>(
            r"
            UPDATE tasks
            SET total_minutes = GREATEST(total_minutes + $2, 0), updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, total_minutes, project_id, assigned_to,
                      created_by, tag_ids, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Task::try_from).transpose()
    }
}
