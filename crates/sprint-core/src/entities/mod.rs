//! Domain entities - core business objects

mod audit_record;
mod comment;
mod project;
mod tag;
mod task;
mod time_entry;
mod user;

pub use audit_record::{AuditRecord, NewAuditRecord};
pub use comment::Comment;
pub use project::{Project, ProjectStatus};
pub use tag::Tag;
pub use task::{Task, TaskStatus};
pub use time_entry::TimeEntry;
pub use user::{Address, Theme, User, UserPreferences, UserProfile};
