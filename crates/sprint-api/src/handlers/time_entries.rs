//! Time entry handlers

use axum::{extract::State, Json};
use sprint_service::dto::{CreateTimeEntryRequest, TimeEntryListQuery, TimeEntryResponse};
use sprint_service::services::TimeEntryService;

use crate::audit::AuditScope;
use crate::extractors::{AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /time-entries
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<CreateTimeEntryRequest>,
) -> ApiResult<Created<Json<TimeEntryResponse>>> {
    let service = TimeEntryService::new(state.service_context());
    let entry = service.create_entry(auth.id, request).await?;
    scope.created(&entry);
    Ok(Created(Json(entry)))
}

/// GET /time-entries
pub async fn list_entries(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<TimeEntryListQuery>,
) -> ApiResult<Json<Vec<TimeEntryResponse>>> {
    let service = TimeEntryService::new(state.service_context());
    Ok(Json(service.list_entries(query).await?))
}

/// GET /time-entries/:id
pub async fn get_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(entry_id): IdPath,
) -> ApiResult<Json<TimeEntryResponse>> {
    let service = TimeEntryService::new(state.service_context());
    Ok(Json(service.get_entry(entry_id).await?))
}

/// DELETE /time-entries/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(entry_id): IdPath,
) -> ApiResult<NoContent> {
    let service = TimeEntryService::new(state.service_context());
    service.delete_entry(entry_id).await?;
    Ok(NoContent)
}
