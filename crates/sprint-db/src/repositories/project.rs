//! PostgreSQL implementation of ProjectRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use sprint_core::entities::Project;
use sprint_core::error::DomainError;
use sprint_core::traits::{EntityRepository, ProjectQuery, ProjectRepository, RepoResult};
use sprint_core::value_objects::Snowflake;

use crate::mappers::raw_ids;
use crate::models::ProjectModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ProjectRepository
#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    /// Create a new PgProjectRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Project> for PgProjectRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Project>> {
        let result = sqlx::query_as::<_, ProjectModel>(
            r"
            SELECT id, name, description, status, start_date, end_date, created_by,
                   member_ids, created_at, updated_at
            FROM projects
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Project::try_from).transpose()
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    #[instrument(skip(self, project), fields(project_id = %project.id))]
    async fn create(&self, project: &Project) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO projects (id, name, description, status, start_date, end_date,
                                  created_by, member_ids, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(project.id.into_inner())
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.status.as_str())
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(project.created_by.into_inner())
        .bind(raw_ids(&project.member_ids))
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, project), fields(project_id = %project.id))]
    async fn update(&self, project: &Project) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE projects
            SET name = $2, description = $3, status = $4, start_date = $5, end_date = $6,
                member_ids = $7, updated_at = $8
            WHERE id = $1
            ",
        )
        .bind(project.id.into_inner())
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.status.as_str())
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(raw_ids(&project.member_ids))
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProjectNotFound(project.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProjectNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ProjectQuery) -> RepoResult<(Vec<Project>, i64)> {
        let status = query.status.map(|s| s.as_str());

        let rows = sqlx::query_as::<_, ProjectModel>(
            r"
            SELECT id, name, description, status, start_date, end_date, created_by,
                   member_ids, created_at, updated_at
            FROM projects
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(status)
        .bind(query.page.limit)
        .bind(query.page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let projects = rows
            .into_iter()
            .map(Project::try_from)
            .collect::<RepoResult<Vec<_>>>()?;
        Ok((projects, total))
    }
}
