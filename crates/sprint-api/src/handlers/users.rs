//! User handlers
//!
//! Profile endpoints for the caller plus administrator account management.

use axum::{extract::State, Json};
use sprint_service::dto::{
    AdminUpdateUserRequest, ChangePasswordRequest, MessageResponse, PagedResponse,
    UpdateProfileRequest, UserListQuery, UserResponse,
};
use sprint_service::services::UserService;

use crate::audit::AuditScope;
use crate::extractors::{AdminUser, AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<UserListQuery>,
) -> ApiResult<Json<PagedResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list_users(query).await?))
}

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(auth.id).await?))
}

/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.update_profile(auth.id, request).await?;
    scope.updated(&user);
    Ok(Json(user))
}

/// POST /users/@me/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.change_password(auth.id, request).await?;
    scope.updated(&user);
    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(user_id).await?))
}

/// PATCH /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(user_id): IdPath,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<AdminUpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.update_user(user_id, request).await?;
    scope.updated(&user);
    Ok(Json(user))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(user_id): IdPath,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_user(user_id).await?;
    Ok(NoContent)
}
