//! Authentication extractors
//!
//! The `authenticate` middleware decodes the bearer token and stores an
//! [`AuthUser`] in the request extensions; these extractors read it back.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sprint_core::{DomainError, Snowflake};

use crate::response::ApiError;

/// Caller identity established from a valid access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Snowflake,
    pub is_admin: bool,
}

impl AuthUser {
    pub fn new(id: Snowflake, is_admin: bool) -> Self {
        Self { id, is_admin }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(ApiError::MissingAuth)
    }
}

/// Authenticated caller whose token carries the administrator flag
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::debug!(user_id = %user.id, "Administrator route refused");
            return Err(DomainError::AdminRequired.into());
        }
        Ok(AdminUser(user))
    }
}
