//! Task handlers

use axum::{extract::State, Json};
use sprint_service::dto::{
    AddTimeRequest, CreateTaskRequest, PagedResponse, TaskListQuery, TaskResponse,
    UpdateTaskRequest, UpdateTaskStatusRequest,
};
use sprint_service::services::TaskService;

use crate::audit::AuditScope;
use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<Created<Json<TaskResponse>>> {
    let service = TaskService::new(state.service_context());
    let task = service.create_task(auth.id, request).await?;
    scope.created(&task);
    Ok(Created(Json(task)))
}

/// GET /tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<TaskListQuery>,
) -> ApiResult<Json<PagedResponse<TaskResponse>>> {
    let service = TaskService::new(state.service_context());
    Ok(Json(service.list_tasks(query).await?))
}

/// GET /tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(task_id): IdPath,
) -> ApiResult<Json<TaskResponse>> {
    let service = TaskService::new(state.service_context());
    Ok(Json(service.get_task(task_id).await?))
}

/// PUT /tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(task_id): IdPath,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let service = TaskService::new(state.service_context());
    let task = service.update_task(task_id, request).await?;
    scope.updated(&task);
    Ok(Json(task))
}

/// PATCH /tasks/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(task_id): IdPath,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<UpdateTaskStatusRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let service = TaskService::new(state.service_context());
    let task = service.change_status(task_id, request.status).await?;
    scope.updated(&task);
    Ok(Json(task))
}

/// PATCH /tasks/:id/time
pub async fn add_time(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(task_id): IdPath,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<AddTimeRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let service = TaskService::new(state.service_context());
    let task = service.add_time(task_id, request.minutes).await?;
    scope.updated(&task);
    Ok(Json(task))
}

/// DELETE /tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(task_id): IdPath,
) -> ApiResult<NoContent> {
    let service = TaskService::new(state.service_context());
    service.delete_task(task_id).await?;
    Ok(NoContent)
}
