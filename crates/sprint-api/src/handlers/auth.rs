//! Authentication handlers
//!
//! Neither route has a session yet, so both name the acting user on the
//! audit scope themselves.

use axum::{extract::State, Json};
use sprint_service::dto::{AuthResponse, LoginRequest, SignupRequest};
use sprint_service::services::AuthService;

use crate::audit::AuditScope;
use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create an account and sign in
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.signup(request).await?;

    scope.set_actor(response.user.id);
    scope.created(&response.user);
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    scope: AuditScope,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;

    scope.set_actor(response.user.id);
    Ok(Json(response))
}
