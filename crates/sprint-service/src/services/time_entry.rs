//! Time entry service
//!
//! Logging an entry adds its minutes to the parent task; deleting it takes
//! them back off, never below zero.

use sprint_core::entities::TimeEntry;
use sprint_core::traits::TimeEntryQuery;
use sprint_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{CreateTimeEntryRequest, TimeEntryListQuery, TimeEntryResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct TimeEntryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TimeEntryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(task_id = %request.task_id, minutes = request.minutes))]
    pub async fn create_entry(
        &self,
        user_id: Snowflake,
        request: CreateTimeEntryRequest,
    ) -> ServiceResult<TimeEntryResponse> {
        if request.minutes < 1 {
            return Err(ServiceError::validation("Minutes must be at least 1"));
        }
        if let (Some(start), Some(end)) = (request.start_time, request.end_time) {
            if end < start {
                return Err(ServiceError::validation("end_time must not be before start_time"));
            }
        }
        if self.ctx.task_repo().find_by_id(request.task_id).await?.is_none() {
            return Err(DomainError::TaskNotFound(request.task_id).into());
        }

        let mut entry = TimeEntry::new(
            self.ctx.generate_id(),
            request.task_id,
            user_id,
            request.minutes,
        );
        entry.start_time = request.start_time;
        entry.end_time = request.end_time;
        entry.notes = request.notes;

        self.ctx.time_entry_repo().create(&entry).await?;
        self.ctx
            .task_repo()
            .adjust_minutes(entry.task_id, entry.minutes)
            .await?;

        info!(entry_id = %entry.id, "Time entry logged");
        Ok(TimeEntryResponse::from(&entry))
    }

    /// Entries matching the filters, newest first
    #[instrument(skip(self))]
    pub async fn list_entries(&self, query: TimeEntryListQuery) -> ServiceResult<Vec<TimeEntryResponse>> {
        let entries = self
            .ctx
            .time_entry_repo()
            .list(&TimeEntryQuery {
                task_id: query.task_id,
                user_id: query.user_id,
            })
            .await?;
        Ok(entries.iter().map(TimeEntryResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_entry(&self, entry_id: Snowflake) -> ServiceResult<TimeEntryResponse> {
        let entry = self.find(entry_id).await?;
        Ok(TimeEntryResponse::from(&entry))
    }

    #[instrument(skip(self))]
    pub async fn delete_entry(&self, entry_id: Snowflake) -> ServiceResult<()> {
        let entry = self.find(entry_id).await?;
        self.ctx.time_entry_repo().delete(entry_id).await?;

        let task = self
            .ctx
            .task_repo()
            .adjust_minutes(entry.task_id, -entry.minutes)
            .await?;
        if task.is_none() {
            warn!(task_id = %entry.task_id, "Parent task missing while rolling back minutes");
        }

        info!(entry_id = %entry_id, "Time entry deleted");
        Ok(())
    }

    async fn find(&self, entry_id: Snowflake) -> ServiceResult<TimeEntry> {
        Ok(self
            .ctx
            .time_entry_repo()
            .find_by_id(entry_id)
            .await?
            .ok_or(DomainError::TimeEntryNotFound(entry_id))?)
    }
}
