//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, ids and query strings.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AdminUser, AuthUser};
pub use path::IdPath;
pub use query::QueryParams;
pub use validated::ValidatedJson;
