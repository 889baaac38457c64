//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    AuditRecord, Comment, NewAuditRecord, Project, ProjectStatus, Tag, Task, TaskStatus,
    TimeEntry, User,
};
use crate::error::DomainError;
use crate::value_objects::{AuditAction, EntityType, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Offset window over a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Window for a 1-based page number
    pub fn numbered(page: u32, limit: u32) -> Self {
        let page = i64::from(page.max(1));
        let limit = i64::from(limit.max(1));
        Self {
            limit,
            offset: (page - 1) * limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::numbered(1, 20)
    }
}

// ============================================================================
// Lookup by id (shared by every entity repository)
// ============================================================================

#[async_trait]
pub trait EntityRepository<E>: Send + Sync {
    /// Find an entity by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<E>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: EntityRepository<User> {
    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields and admin flag
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Delete a user
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Replace the stored password hash and bump `updated_at`
    async fn update_password_hash(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// Page through users, newest first, with the total count
    async fn list(&self, page: Page) -> RepoResult<(Vec<User>, i64)>;
}

// ============================================================================
// Project Repository
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub status: Option<ProjectStatus>,
    pub page: Page,
}

#[async_trait]
pub trait ProjectRepository: EntityRepository<Project> {
    async fn create(&self, project: &Project) -> RepoResult<()>;

    async fn update(&self, project: &Project) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn list(&self, query: &ProjectQuery) -> RepoResult<(Vec<Project>, i64)>;
}

// ============================================================================
// Task Repository
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub project_id: Option<Snowflake>,
    pub assigned_to: Option<Snowflake>,
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    pub page: Page,
}

#[async_trait]
pub trait TaskRepository: EntityRepository<Task> {
    async fn create(&self, task: &Task) -> RepoResult<()>;

    async fn update(&self, task: &Task) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn list(&self, query: &TaskQuery) -> RepoResult<(Vec<Task>, i64)>;

    /// Atomically add `delta` minutes (may be negative), clamped at zero.
    /// Returns the updated task, or `None` if it does not exist.
    async fn adjust_minutes(&self, id: Snowflake, delta: i32) -> RepoResult<Option<Task>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: EntityRepository<Comment> {
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Comments on a task, oldest first
    async fn list_by_task(&self, task_id: Snowflake) -> RepoResult<Vec<Comment>>;
}

// ============================================================================
// Time Entry Repository
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TimeEntryQuery {
    pub task_id: Option<Snowflake>,
    pub user_id: Option<Snowflake>,
}

#[async_trait]
pub trait TimeEntryRepository: EntityRepository<TimeEntry> {
    async fn create(&self, entry: &TimeEntry) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Entries matching the filter, newest first
    async fn list(&self, query: &TimeEntryQuery) -> RepoResult<Vec<TimeEntry>>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: EntityRepository<Tag> {
    async fn create(&self, tag: &Tag) -> RepoResult<()>;

    async fn update(&self, tag: &Tag) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// All tags ordered by name
    async fn list(&self) -> RepoResult<Vec<Tag>>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

/// Filters for the admin audit listing
#[derive(Debug, Clone, Default)]
pub struct AuditLogQuery {
    pub actor_id: Option<Snowflake>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Snowflake>,
    pub action: Option<AuditAction>,
    pub page: Page,
}

impl AuditLogQuery {
    /// Whether a record passes every filter that is set
    pub fn matches(&self, record: &AuditRecord) -> bool {
        self.actor_id.is_none_or(|id| id == record.actor_id)
            && self.entity_type.is_none_or(|ty| ty == record.entity_type)
            && self.action.is_none_or(|action| action == record.action)
            && self.entity_id.is_none_or(|id| record.entity_id == Some(id))
    }
}

/// Append-only audit trail storage; stored records are never updated or deleted
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Persist a record, assigning its id and creation timestamp
    async fn append(&self, record: NewAuditRecord) -> RepoResult<AuditRecord>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AuditRecord>>;

    /// Matching records newest first, with the total match count
    async fn list(&self, query: &AuditLogQuery) -> RepoResult<(Vec<AuditRecord>, i64)>;
}
