//! Dashboard statistics

use axum::{extract::State, Json};
use sprint_service::dto::{
    AdminStatsResponse, DailyMinutesResponse, TimePerDayQuery, UserStatsResponse,
};
use sprint_service::services::StatsService;

use crate::extractors::{AdminUser, AuthUser, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /stats/admin
pub async fn admin_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<AdminStatsResponse>> {
    let service = StatsService::new(state.service_context());
    Ok(Json(service.admin_stats().await?))
}

/// GET /stats/me
pub async fn my_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserStatsResponse>> {
    let service = StatsService::new(state.service_context());
    Ok(Json(service.user_stats(auth.id).await?))
}

/// GET /stats/time-per-day
pub async fn time_per_day(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<TimePerDayQuery>,
) -> ApiResult<Json<Vec<DailyMinutesResponse>>> {
    let service = StatsService::new(state.service_context());
    Ok(Json(service.time_per_day(auth.id, query).await?))
}
