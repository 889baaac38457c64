//! PostgreSQL implementation of StatsRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{instrument, warn};

use sprint_core::entities::TaskStatus;
use sprint_core::traits::{
    DailyMinutes, DateRange, EntityCounts, RepoResult, StatsRepository, TaskStatusCounts,
};
use sprint_core::value_objects::Snowflake;

use super::error::map_db_error;

/// Aggregate queries over the whole schema
#[derive(Clone)]
pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    #[instrument(skip(self))]
    async fn entity_counts(&self) -> RepoResult<EntityCounts> {
        let (users, tags, projects, tasks) = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r"
            SELECT (SELECT COUNT(*) FROM users),
                   (SELECT COUNT(*) FROM tags),
                   (SELECT COUNT(*) FROM projects),
                   (SELECT COUNT(*) FROM tasks)
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EntityCounts {
            users,
            tags,
            projects,
            tasks,
        })
    }

    #[instrument(skip(self))]
    async fn task_counts_for(&self, user_id: Snowflake) -> RepoResult<TaskStatusCounts> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT status, COUNT(*) FROM tasks
            WHERE assigned_to = $1
            GROUP BY status
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(fold_status_counts(rows))
    }

    #[instrument(skip(self))]
    async fn minutes_per_day(
        &self,
        user_id: Snowflake,
        range: DateRange,
    ) -> RepoResult<Vec<DailyMinutes>> {
        let rows = sqlx::query_as::<_, (NaiveDate, i64)>(
            r"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS day, SUM(minutes)::BIGINT
            FROM time_entries
            WHERE user_id = $1
              AND ($2::date IS NULL OR (created_at AT TIME ZONE 'UTC')::date >= $2)
              AND ($3::date IS NULL OR (created_at AT TIME ZONE 'UTC')::date <= $3)
            GROUP BY day
            ORDER BY day
            ",
        )
        .bind(user_id.into_inner())
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(date, total_minutes)| DailyMinutes {
                date,
                total_minutes,
            })
            .collect())
    }
}

fn fold_status_counts(rows: Vec<(String, i64)>) -> TaskStatusCounts {
    rows.into_iter()
        .fold(TaskStatusCounts::default(), |mut counts, (status, count)| {
            match status.parse::<TaskStatus>() {
                Ok(TaskStatus::Todo) => counts.todo = count,
                Ok(TaskStatus::InProgress) => counts.in_progress = count,
                Ok(TaskStatus::Done) => counts.done = count,
                Err(_) => warn!(%status, "Ignoring unknown task status"),
            }
            counts
        })
}
