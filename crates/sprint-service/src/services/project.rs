//! Project service

use sprint_core::entities::{Project, ProjectStatus};
use sprint_core::traits::ProjectQuery;
use sprint_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    page_window, CreateProjectRequest, PagedResponse, ProjectListQuery, ProjectResponse,
    UpdateProjectRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ProjectService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProjectService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_project(
        &self,
        creator_id: Snowflake,
        request: CreateProjectRequest,
    ) -> ServiceResult<ProjectResponse> {
        let mut project = Project::new(self.ctx.generate_id(), request.name, creator_id);
        project.description = request.description;
        project.status = request.status.unwrap_or_default();
        project.start_date = request.start_date;
        project.end_date = request.end_date;
        add_members(&mut project, request.member_ids);
        project.validate_dates()?;

        self.ctx.project_repo().create(&project).await?;

        info!(project_id = %project.id, "Project created");
        Ok(ProjectResponse::from(&project))
    }

    #[instrument(skip(self))]
    pub async fn list_projects(
        &self,
        query: ProjectListQuery,
    ) -> ServiceResult<PagedResponse<ProjectResponse>> {
        let window = page_window(query.page, query.limit);
        let (projects, total) = self
            .ctx
            .project_repo()
            .list(&ProjectQuery {
                status: query.status,
                page: window,
            })
            .await?;

        Ok(PagedResponse::new(
            projects.iter().map(ProjectResponse::from).collect(),
            window,
            total,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_project(&self, project_id: Snowflake) -> ServiceResult<ProjectResponse> {
        let project = self.find(project_id).await?;
        Ok(ProjectResponse::from(&project))
    }

    #[instrument(skip(self, request))]
    pub async fn update_project(
        &self,
        project_id: Snowflake,
        request: UpdateProjectRequest,
    ) -> ServiceResult<ProjectResponse> {
        let mut project = self.find(project_id).await?;

        if let Some(name) = request.name {
            project.name = name;
        }
        if let Some(description) = request.description {
            project.description = Some(description);
        }
        if let Some(start_date) = request.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(end_date) = request.end_date {
            project.end_date = Some(end_date);
        }
        if let Some(member_ids) = request.member_ids {
            project.member_ids = vec![project.created_by];
            add_members(&mut project, member_ids);
        }
        match request.status {
            Some(status) => project.set_status(status),
            None => project.updated_at = chrono::Utc::now(),
        }
        project.validate_dates()?;

        self.ctx.project_repo().update(&project).await?;

        info!(project_id = %project_id, "Project updated");
        Ok(ProjectResponse::from(&project))
    }

    #[instrument(skip(self))]
    pub async fn change_status(
        &self,
        project_id: Snowflake,
        status: ProjectStatus,
    ) -> ServiceResult<ProjectResponse> {
        let mut project = self.find(project_id).await?;
        project.set_status(status);
        self.ctx.project_repo().update(&project).await?;

        info!(project_id = %project_id, status = %status, "Project status changed");
        Ok(ProjectResponse::from(&project))
    }

    #[instrument(skip(self))]
    pub async fn delete_project(&self, project_id: Snowflake) -> ServiceResult<()> {
        self.ctx.project_repo().delete(project_id).await?;
        info!(project_id = %project_id, "Project deleted");
        Ok(())
    }

    async fn find(&self, project_id: Snowflake) -> ServiceResult<Project> {
        Ok(self
            .ctx
            .project_repo()
            .find_by_id(project_id)
            .await?
            .ok_or(DomainError::ProjectNotFound(project_id))?)
    }
}

fn add_members(project: &mut Project, member_ids: Vec<Snowflake>) {
    for id in member_ids {
        if !project.member_ids.contains(&id) {
            project.member_ids.push(id);
        }
    }
}
