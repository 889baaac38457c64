//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in sprint-core.
//! Each repository handles database operations for a specific domain entity.

mod audit_log;
mod comment;
mod error;
mod project;
mod stats;
mod tag;
mod task;
mod time_entry;
mod user;

pub use audit_log::PgAuditLogRepository;
pub use comment::PgCommentRepository;
pub use project::PgProjectRepository;
pub use stats::PgStatsRepository;
pub use tag::PgTagRepository;
pub use task::PgTaskRepository;
pub use time_entry::PgTimeEntryRepository;
pub use user::PgUserRepository;
