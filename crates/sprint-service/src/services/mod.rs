//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod audit_log;
pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod project;
pub mod stats;
pub mod tag;
pub mod task;
pub mod time_entry;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use audit_log::AuditLogService;
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use project::ProjectService;
pub use stats::StatsService;
pub use tag::TagService;
pub use task::TaskService;
pub use time_entry::TimeEntryService;
pub use user::UserService;
