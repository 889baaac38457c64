//! Project handlers

use axum::{extract::State, Json};
use sprint_service::dto::{
    CreateProjectRequest, PagedResponse, ProjectListQuery, ProjectResponse, UpdateProjectRequest,
    UpdateProjectStatusRequest,
};
use sprint_service::services::ProjectService;

use crate::audit::AuditScope;
use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<CreateProjectRequest>,
) -> ApiResult<Created<Json<ProjectResponse>>> {
    let service = ProjectService::new(state.service_context());
    let project = service.create_project(auth.id, request).await?;
    scope.created(&project);
    Ok(Created(Json(project)))
}

/// GET /projects
pub async fn list_projects(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<ProjectListQuery>,
) -> ApiResult<Json<PagedResponse<ProjectResponse>>> {
    let service = ProjectService::new(state.service_context());
    Ok(Json(service.list_projects(query).await?))
}

/// GET /projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(project_id): IdPath,
) -> ApiResult<Json<ProjectResponse>> {
    let service = ProjectService::new(state.service_context());
    Ok(Json(service.get_project(project_id).await?))
}

/// PUT /projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(project_id): IdPath,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let service = ProjectService::new(state.service_context());
    let project = service.update_project(project_id, request).await?;
    scope.updated(&project);
    Ok(Json(project))
}

/// PATCH /projects/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(project_id): IdPath,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<UpdateProjectStatusRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let service = ProjectService::new(state.service_context());
    let project = service.change_status(project_id, request.status).await?;
    scope.updated(&project);
    Ok(Json(project))
}

/// DELETE /projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(project_id): IdPath,
) -> ApiResult<NoContent> {
    let service = ProjectService::new(state.service_context());
    service.delete_project(project_id).await?;
    Ok(NoContent)
}
