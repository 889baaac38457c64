//! Ports implemented by the infrastructure crates

mod notifications;
mod repositories;
mod stats;

pub use notifications::{AdminDirectory, AuditNotifier, NotificationKind};
pub use repositories::{
    AuditLogQuery, AuditLogRepository, CommentRepository, EntityRepository, Page, ProjectQuery,
    ProjectRepository, RepoResult, TagRepository, TaskQuery, TaskRepository, TimeEntryQuery,
    TimeEntryRepository, UserRepository,
};
pub use stats::{DailyMinutes, DateRange, EntityCounts, StatsRepository, TaskStatusCounts};
