//! Bearer token authentication
//!
//! Decodes an optional `Authorization: Bearer` header and stores the caller
//! as [`AuthUser`] in the request extensions. Requests without the header
//! pass through anonymous; a present but unusable token is rejected.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::warn;

use crate::extractors::AuthUser;
use crate::response::ApiError;
use crate::state::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = request
        .headers()
        .typed_try_get::<Authorization<Bearer>>()
        .map_err(|_| ApiError::InvalidAuthFormat)?;

    if let Some(Authorization(bearer)) = bearer {
        let claims = state.jwt_service().validate(bearer.token()).map_err(|e| {
            warn!(error = %e, "Rejected access token");
            e
        })?;
        let user = AuthUser::new(claims.user_id()?, claims.admin);
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}
