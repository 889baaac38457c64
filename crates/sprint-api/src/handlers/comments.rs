//! Comment handlers

use axum::{extract::State, Json};
use sprint_service::dto::{CommentResponse, CreateCommentRequest};
use sprint_service::services::CommentService;

use crate::audit::AuditScope;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service.create_comment(auth.id, request).await?;
    scope.created(&comment);
    Ok(Created(Json(comment)))
}

/// GET /comments/task/:task_id
pub async fn list_for_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(task_id): IdPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list_for_task(task_id).await?))
}

/// DELETE /comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service
        .delete_comment(comment_id, auth.id, auth.is_admin)
        .await?;
    Ok(NoContent)
}
