//! # sprint-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuditRecord, Comment, NewAuditRecord, Project, ProjectStatus, Tag, Task, TaskStatus,
    TimeEntry, User,
};
pub use error::DomainError;
pub use traits::{
    AdminDirectory, AuditLogQuery, AuditLogRepository, AuditNotifier, CommentRepository,
    EntityRepository, NotificationKind, Page, ProjectQuery, ProjectRepository, RepoResult,
    StatsRepository, TagRepository, TaskQuery, TaskRepository, TimeEntryQuery,
    TimeEntryRepository, UserRepository,
};
pub use value_objects::{
    AuditAction, EntityType, ParseEnumError, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
