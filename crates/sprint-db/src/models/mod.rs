//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audit_log;
mod comment;
mod project;
mod tag;
mod task;
mod time_entry;
mod user;

pub use audit_log::AuditLogModel;
pub use comment::CommentModel;
pub use project::ProjectModel;
pub use tag::TagModel;
pub use task::TaskModel;
pub use time_entry::TimeEntryModel;
pub use user::UserModel;
