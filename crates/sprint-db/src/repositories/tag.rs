//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use sprint_core::entities::Tag;
use sprint_core::error::DomainError;
use sprint_core::traits::{EntityRepository, RepoResult, TagRepository};
use sprint_core::value_objects::Snowflake;

use crate::models::TagModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TagRepository
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new PgTagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Tag> for PgTagRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tag>> {
        let result = sqlx::query_as::<_, TagModel>(
            r"
            SELECT id, name, color, description, created_by, created_at, updated_at
            FROM tags
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Tag::from))
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self, tag), fields(tag_id = %tag.id))]
    async fn create(&self, tag: &Tag) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO tags (id, name, color, description, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(tag.id.into_inner())
        .bind(&tag.name)
        .bind(&tag.color)
        .bind(&tag.description)
        .bind(tag.created_by.into_inner())
        .bind(tag.created_at)
        .bind(tag.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TagNameExists))?;

        Ok(())
    }

    #[instrument(skip(self, tag), fields(tag_id = %tag.id))]
    async fn update(&self, tag: &Tag) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE tags
            SET name = $2, color = $3, description = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(tag.id.into_inner())
        .bind(&tag.name)
        .bind(&tag.color)
        .bind(&tag.description)
        .bind(tag.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TagNameExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TagNotFound(tag.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TagNotFound(id));
        }

        // Drop dangling references from tasks
        sqlx::query("UPDATE tasks SET tag_ids = array_remove(tag_ids, $1) WHERE $1 = ANY(tag_ids)")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Tag>> {
        let results = sqlx::query_as::<_, TagModel>(
            r"
            SELECT id, name, color, description, created_by, created_at, updated_at
            FROM tags
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Tag::from).collect())
    }
}
