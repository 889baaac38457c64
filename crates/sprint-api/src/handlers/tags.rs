//! Tag handlers
//!
//! Anyone signed in may read tags; only administrators change them.

use axum::{extract::State, Json};
use sprint_service::dto::{CreateTagRequest, TagResponse, UpdateTagRequest};
use sprint_service::services::TagService;

use crate::audit::AuditScope;
use crate::extractors::{AdminUser, AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /tags
pub async fn create_tag(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<CreateTagRequest>,
) -> ApiResult<Created<Json<TagResponse>>> {
    let service = TagService::new(state.service_context());
    let tag = service.create_tag(admin.id, request).await?;
    scope.created(&tag);
    Ok(Created(Json(tag)))
}

/// GET /tags
pub async fn list_tags(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<TagResponse>>> {
    let service = TagService::new(state.service_context());
    Ok(Json(service.list_tags().await?))
}

/// GET /tags/:id
pub async fn get_tag(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(tag_id): IdPath,
) -> ApiResult<Json<TagResponse>> {
    let service = TagService::new(state.service_context());
    Ok(Json(service.get_tag(tag_id).await?))
}

/// PUT /tags/:id
pub async fn update_tag(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(tag_id): IdPath,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<UpdateTagRequest>,
) -> ApiResult<Json<TagResponse>> {
    let service = TagService::new(state.service_context());
    let tag = service.update_tag(tag_id, request).await?;
    scope.updated(&tag);
    Ok(Json(tag))
}

/// DELETE /tags/:id
pub async fn delete_tag(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(tag_id): IdPath,
) -> ApiResult<NoContent> {
    let service = TagService::new(state.service_context());
    service.delete_tag(tag_id).await?;
    Ok(NoContent)
}
