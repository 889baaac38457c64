//! Aggregate read models for the dashboards

use async_trait::async_trait;
use chrono::NaiveDate;

use super::repositories::RepoResult;
use crate::value_objects::Snowflake;

/// Row counts across the whole tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub users: i64,
    pub tags: i64,
    pub projects: i64,
    pub tasks: i64,
}

/// Tasks assigned to one user, per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStatusCounts {
    pub todo: i64,
    pub in_progress: i64,
    pub done: i64,
}

/// Inclusive range of UTC calendar days; open ends are unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Minutes logged on one UTC day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyMinutes {
    pub date: NaiveDate,
    pub total_minutes: i64,
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn entity_counts(&self) -> RepoResult<EntityCounts>;

    /// Status breakdown of the tasks assigned to `user_id`
    async fn task_counts_for(&self, user_id: Snowflake) -> RepoResult<TaskStatusCounts>;

    /// Minutes `user_id` logged per day of entry creation, oldest day first.
    /// Days without entries are omitted.
    async fn minutes_per_day(
        &self,
        user_id: Snowflake,
        range: DateRange,
    ) -> RepoResult<Vec<DailyMinutes>>;
}
