//! Audit interception for HTTP routes
//!
//! [`AuditLayer`] wraps a route, loads the before-state of UPDATE and DELETE
//! targets, exposes an [`AuditScope`] to the handler and, once a successful
//! response body has been fully delivered, hands the invocation to the
//! [`sprint_service::Auditor`] on a detached task.

mod body;
mod layer;
mod scope;

pub use layer::{AuditLayer, AuditService};
pub use scope::AuditScope;
