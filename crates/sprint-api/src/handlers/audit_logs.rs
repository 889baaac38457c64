//! Administrator view of the audit trail

use axum::{extract::State, Json};
use sprint_service::dto::{
    AuditLogListQuery, AuditLogResponse, CreateAuditLogRequest, PagedResponse,
};
use sprint_service::services::AuditLogService;

use crate::extractors::{AdminUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /audit-logs
pub async fn list_logs(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<AuditLogListQuery>,
) -> ApiResult<Json<PagedResponse<AuditLogResponse>>> {
    let service = AuditLogService::new(state.service_context());
    Ok(Json(service.list_logs(query).await?))
}

/// GET /audit-logs/:id
pub async fn get_log(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(log_id): IdPath,
) -> ApiResult<Json<AuditLogResponse>> {
    let service = AuditLogService::new(state.service_context());
    Ok(Json(service.get_log(log_id).await?))
}

/// POST /audit-logs
///
/// Manual entry; the caller becomes the actor.
pub async fn create_log(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateAuditLogRequest>,
) -> ApiResult<Created<Json<AuditLogResponse>>> {
    let service = AuditLogService::new(state.service_context());
    Ok(Created(Json(service.create_log(admin.id, request).await?)))
}
