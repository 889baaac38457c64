//! Task service
//!
//! Tasks may link to a project, an assignee and any number of tags; every
//! link is checked before a write. Logged minutes only grow through
//! [`TaskService::add_time`] and time entries.

use sprint_core::entities::{Task, TaskStatus};
use sprint_core::traits::TaskQuery;
use sprint_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    page_window, CreateTaskRequest, PagedResponse, TaskListQuery, TaskResponse, UpdateTaskRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct TaskService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TaskService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_task(
        &self,
        creator_id: Snowflake,
        request: CreateTaskRequest,
    ) -> ServiceResult<TaskResponse> {
        self.check_links(request.project_id, request.assigned_to, &request.tag_ids)
            .await?;

        let mut task = Task::new(self.ctx.generate_id(), request.title, creator_id);
        task.description = request.description;
        task.project_id = request.project_id;
        task.assigned_to = request.assigned_to;
        task.tag_ids = dedup(request.tag_ids);

        self.ctx.task_repo().create(&task).await?;

        info!(task_id = %task.id, "Task created");
        Ok(TaskResponse::from(&task))
    }

    #[instrument(skip(self))]
    pub async fn list_tasks(&self, query: TaskListQuery) -> ServiceResult<PagedResponse<TaskResponse>> {
        let window = page_window(query.page, query.limit);
        let (tasks, total) = self
            .ctx
            .task_repo()
            .list(&TaskQuery {
                status: query.status,
                project_id: query.project_id,
                assigned_to: query.assigned_to,
                title: query.title.filter(|t| !t.trim().is_empty()),
                page: window,
            })
            .await?;

        Ok(PagedResponse::new(
            tasks.iter().map(TaskResponse::from).collect(),
            window,
            total,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: Snowflake) -> ServiceResult<TaskResponse> {
        let task = self.find(task_id).await?;
        Ok(TaskResponse::from(&task))
    }

    #[instrument(skip(self, request))]
    pub async fn update_task(
        &self,
        task_id: Snowflake,
        request: UpdateTaskRequest,
    ) -> ServiceResult<TaskResponse> {
        let mut task = self.find(task_id).await?;
        self.check_links(
            request.project_id,
            request.assigned_to,
            request.tag_ids.as_deref().unwrap_or_default(),
        )
        .await?;

        if let Some(title) = request.title {
            task.title = title;
        }
        if let Some(description) = request.description {
            task.description = Some(description);
        }
        if let Some(project_id) = request.project_id {
            task.project_id = Some(project_id);
        }
        if let Some(assigned_to) = request.assigned_to {
            task.assigned_to = Some(assigned_to);
        }
        if let Some(tag_ids) = request.tag_ids {
            task.tag_ids = dedup(tag_ids);
        }
        match request.status {
            Some(status) => task.set_status(status),
            None => task.updated_at = chrono::Utc::now(),
        }

        self.ctx.task_repo().update(&task).await?;

        info!(task_id = %task_id, "Task updated");
        Ok(TaskResponse::from(&task))
    }

    #[instrument(skip(self))]
    pub async fn change_status(
        &self,
        task_id: Snowflake,
        status: TaskStatus,
    ) -> ServiceResult<TaskResponse> {
        let mut task = self.find(task_id).await?;
        task.set_status(status);
        self.ctx.task_repo().update(&task).await?;

        info!(task_id = %task_id, status = %status, "Task status changed");
        Ok(TaskResponse::from(&task))
    }

    /// Add non-negative minutes to the task's running total
    #[instrument(skip(self))]
    pub async fn add_time(&self, task_id: Snowflake, minutes: i32) -> ServiceResult<TaskResponse> {
        if minutes < 0 {
            return Err(DomainError::NegativeMinutes.into());
        }
        let task = self
            .ctx
            .task_repo()
            .adjust_minutes(task_id, minutes)
            .await?
            .ok_or(DomainError::TaskNotFound(task_id))?;

        info!(task_id = %task_id, minutes, total = task.total_minutes, "Time added to task");
        Ok(TaskResponse::from(&task))
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: Snowflake) -> ServiceResult<()> {
        self.ctx.task_repo().delete(task_id).await?;
        info!(task_id = %task_id, "Task deleted");
        Ok(())
    }

    async fn find(&self, task_id: Snowflake) -> ServiceResult<Task> {
        Ok(self
            .ctx
            .task_repo()
            .find_by_id(task_id)
            .await?
            .ok_or(DomainError::TaskNotFound(task_id))?)
    }

    async fn check_links(
        &self,
        project_id: Option<Snowflake>,
        assigned_to: Option<Snowflake>,
        tag_ids: &[Snowflake],
    ) -> ServiceResult<()> {
        if let Some(id) = project_id {
            if self.ctx.project_repo().find_by_id(id).await?.is_none() {
                return Err(DomainError::ProjectNotFound(id).into());
            }
        }
        if let Some(id) = assigned_to {
            if self.ctx.user_repo().find_by_id(id).await?.is_none() {
                return Err(DomainError::UserNotFound(id).into());
            }
        }
        for &id in tag_ids {
            if self.ctx.tag_repo().find_by_id(id).await?.is_none() {
                return Err(DomainError::TagNotFound(id).into());
            }
        }
        Ok(())
    }
}

fn dedup(mut ids: Vec<Snowflake>) -> Vec<Snowflake> {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(*id));
    ids
}
