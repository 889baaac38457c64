//! Dashboard statistics

use sprint_core::traits::DateRange;
use sprint_core::Snowflake;
use tracing::instrument;

use crate::dto::{AdminStatsResponse, DailyMinutesResponse, TimePerDayQuery, UserStatsResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Totals across the tracker
    #[instrument(skip(self))]
    pub async fn admin_stats(&self) -> ServiceResult<AdminStatsResponse> {
        Ok(self.ctx.stats_repo().entity_counts().await?.into())
    }

    /// Status breakdown of the tasks assigned to `user_id`
    #[instrument(skip(self))]
    pub async fn user_stats(&self, user_id: Snowflake) -> ServiceResult<UserStatsResponse> {
        Ok(self.ctx.stats_repo().task_counts_for(user_id).await?.into())
    }

    /// Minutes `user_id` logged per UTC day, oldest first
    #[instrument(skip(self))]
    pub async fn time_per_day(
        &self,
        user_id: Snowflake,
        query: TimePerDayQuery,
    ) -> ServiceResult<Vec<DailyMinutesResponse>> {
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(ServiceError::validation("start_date must not be after end_date"));
            }
        }

        let range = DateRange {
            from: query.start_date,
            to: query.end_date,
        };
        let days = self.ctx.stats_repo().minutes_per_day(user_id, range).await?;
        Ok(days.into_iter().map(DailyMinutesResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Fixture;
    use chrono::NaiveDate;
    use sprint_core::entities::{Task, TaskStatus, TimeEntry};
    use sprint_core::traits::{TaskRepository, TimeEntryRepository};

    #[tokio::test]
    async fn test_counts() {
        let fx = Fixture::new();
        let dev = fx.user("dev@example.com", false).await;
        fx.user("admin@example.com", true).await;

        for (id, status) in [(1, TaskStatus::Todo), (2, TaskStatus::Done), (3, TaskStatus::Done)] {
            let mut task = Task::new(Snowflake::new(id), format!("task {id}"), dev.id);
            task.status = status;
            task.assigned_to = Some(dev.id);
            TaskRepository::create(fx.repos.as_ref(), &task).await.unwrap();
        }
        let unassigned = Task::new(Snowflake::new(4), "loose".to_string(), dev.id);
        TaskRepository::create(fx.repos.as_ref(), &unassigned).await.unwrap();

        let service = StatsService::new(&fx.ctx);
        let admin = service.admin_stats().await.unwrap();
        assert_eq!(admin.users, 2);
        assert_eq!(admin.tasks, 4);
        assert_eq!(admin.projects, 0);

        let mine = service.user_stats(dev.id).await.unwrap();
        assert_eq!((mine.todo, mine.in_progress, mine.done), (1, 0, 2));
    }

    #[tokio::test]
    async fn test_time_per_day_range() {
        let fx = Fixture::new();
        let dev = fx.user("dev@example.com", false).await;
        let task = Task::new(Snowflake::new(1), "ship".to_string(), dev.id);
        TaskRepository::create(fx.repos.as_ref(), &task).await.unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
        for (id, d) in [(10, 24), (11, 25), (12, 25)] {
            let mut entry = TimeEntry::new(Snowflake::new(id), task.id, dev.id, 20);
            entry.created_at = day(d).and_hms_opt(9, 30, 0).unwrap().and_utc();
            TimeEntryRepository::create(fx.repos.as_ref(), &entry).await.unwrap();
        }

        let service = StatsService::new(&fx.ctx);
        let days = service
            .time_per_day(
                dev.id,
                TimePerDayQuery {
                    start_date: Some(day(25)),
                    end_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, day(25));
        assert_eq!(days[0].total_minutes, 40);

        let err = service
            .time_per_day(
                dev.id,
                TimePerDayQuery {
                    start_date: Some(day(26)),
                    end_date: Some(day(25)),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
