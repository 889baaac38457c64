//! In-process repositories
//!
//! `MemoryRepositories` implements every entity repository over locked hash
//! maps with the same ordering and filtering rules as the PostgreSQL
//! implementations. Used by tests and by tooling that runs without a
//! database.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use sprint_core::entities::{Comment, Project, Tag, Task, TimeEntry, User};
use sprint_core::error::DomainError;
use sprint_core::entities::TaskStatus;
use sprint_core::traits::{
    AdminDirectory, CommentRepository, DailyMinutes, DateRange, EntityCounts, EntityRepository,
    Page, ProjectQuery, ProjectRepository, RepoResult, StatsRepository, TagRepository,
    TaskQuery, TaskRepository, TaskStatusCounts, TimeEntryQuery, TimeEntryRepository,
    UserRepository,
};
use sprint_core::Snowflake;

use crate::services::ServiceContextBuilder;

#[derive(Debug, Default)]
pub struct MemoryRepositories {
    users: RwLock<HashMap<Snowflake, (User, String)>>,
    projects: RwLock<HashMap<Snowflake, Project>>,
    tasks: RwLock<HashMap<Snowflake, Task>>,
    comments: RwLock<HashMap<Snowflake, Comment>>,
    time_entries: RwLock<HashMap<Snowflake, TimeEntry>>,
    tags: RwLock<HashMap<Snowflake, Tag>>,
}

impl MemoryRepositories {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Builder with every repository and the admin directory wired to `self`
    pub fn context_builder(self: &Arc<Self>) -> ServiceContextBuilder {
        ServiceContextBuilder::new()
            .user_repo(self.clone())
            .project_repo(self.clone())
            .task_repo(self.clone())
            .comment_repo(self.clone())
            .time_entry_repo(self.clone())
            .tag_repo(self.clone())
            .stats_repo(self.clone())
            .admin_directory(self.clone())
    }
}

/// Newest first, then apply the window; returns the page and the match count
fn paginate<T: Clone>(
    mut rows: Vec<T>,
    page: Page,
    key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, Snowflake),
) -> (Vec<T>, i64) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    let total = rows.len() as i64;
    let rows = rows
        .into_iter()
        .skip(page.offset.max(0) as usize)
        .take(page.limit.max(0) as usize)
        .collect();
    (rows, total)
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl EntityRepository<User> for MemoryRepositories {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.read().get(&id).map(|(user, _)| user.clone()))
    }
}

#[async_trait]
impl UserRepository for MemoryRepositories {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|(user, _)| user.email.eq_ignore_ascii_case(email))
            .map(|(user, _)| user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut users = self.users.write();
        if users
            .values()
            .any(|(existing, _)| existing.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        users.insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        match self.users.write().get_mut(&user.id) {
            Some((existing, _)) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.users
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::UserNotFound(id))
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.users.read().get(&id).map(|(_, hash)| hash.clone()))
    }

    async fn update_password_hash(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        match self.users.write().get_mut(&id) {
            Some((user, hash)) => {
                *hash = password_hash.to_string();
                user.touch();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(id)),
        }
    }

    async fn list(&self, page: Page) -> RepoResult<(Vec<User>, i64)> {
        let users: Vec<User> = self.users.read().values().map(|(u, _)| u.clone()).collect();
        Ok(paginate(users, page, |u| (u.created_at, u.id)))
    }
}

#[async_trait]
impl AdminDirectory for MemoryRepositories {
    async fn administrators(&self) -> RepoResult<Vec<User>> {
        let mut admins: Vec<User> = self
            .users
            .read()
            .values()
            .filter(|(user, _)| user.is_admin)
            .map(|(user, _)| user.clone())
            .collect();
        admins.sort_by_key(|user| user.id);
        Ok(admins)
    }
}

// ============================================================================
// Projects
// ============================================================================

#[async_trait]
impl EntityRepository<Project> for MemoryRepositories {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Project>> {
        Ok(self.projects.read().get(&id).cloned())
    }
}

#[async_trait]
impl ProjectRepository for MemoryRepositories {
    async fn create(&self, project: &Project) -> RepoResult<()> {
        self.projects.write().insert(project.id, project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> RepoResult<()> {
        match self.projects.write().get_mut(&project.id) {
            Some(existing) => {
                *existing = project.clone();
                Ok(())
            }
            None => Err(DomainError::ProjectNotFound(project.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.projects
            .write()
            .remove(&id)
            .ok_or(DomainError::ProjectNotFound(id))?;
        for task in self.tasks.write().values_mut() {
            if task.project_id == Some(id) {
                task.project_id = None;
            }
        }
        Ok(())
    }

    async fn list(&self, query: &ProjectQuery) -> RepoResult<(Vec<Project>, i64)> {
        let projects: Vec<Project> = self
            .projects
            .read()
            .values()
            .filter(|p| query.status.is_none_or(|status| p.status == status))
            .cloned()
            .collect();
        Ok(paginate(projects, query.page, |p| (p.created_at, p.id)))
    }
}

// ============================================================================
// Tasks
// ============================================================================

#[async_trait]
impl EntityRepository<Task> for MemoryRepositories {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Task>> {
        Ok(self.tasks.read().get(&id).cloned())
    }
}

#[async_trait]
impl TaskRepository for MemoryRepositories {
    async fn create(&self, task: &Task) -> RepoResult<()> {
        self.tasks.write().insert(task.id, task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> RepoResult<()> {
        match self.tasks.write().get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(())
            }
            None => Err(DomainError::TaskNotFound(task.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tasks
            .write()
            .remove(&id)
            .ok_or(DomainError::TaskNotFound(id))?;
        self.comments.write().retain(|_, c| c.task_id != id);
        self.time_entries.write().retain(|_, e| e.task_id != id);
        Ok(())
    }

    async fn list(&self, query: &TaskQuery) -> RepoResult<(Vec<Task>, i64)> {
        let title = query.title.as_ref().map(|t| t.to_lowercase());
        let tasks: Vec<Task> = self
            .tasks
            .read()
            .values()
            .filter(|t| query.status.is_none_or(|status| t.status == status))
            .filter(|t| query.project_id.is_none_or(|id| t.project_id == Some(id)))
            .filter(|t| query.assigned_to.is_none_or(|id| t.assigned_to == Some(id)))
            .filter(|t| {
                title
                    .as_deref()
                    .is_none_or(|needle| t.title.to_lowercase().contains(needle))
            })
            .cloned()
            .collect();
        Ok(paginate(tasks, query.page, |t| (t.created_at, t.id)))
    }

    async fn adjust_minutes(&self, id: Snowflake, delta: i32) -> RepoResult<Option<Task>> {
        let mut tasks = self.tasks.write();
        Ok(tasks.get_mut(&id).map(|task| {
            if delta >= 0 {
                task.total_minutes = task.total_minutes.saturating_add(delta);
                task.updated_at = chrono::Utc::now();
            } else {
                task.remove_minutes(delta.saturating_neg());
            }
            task.clone()
        }))
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl EntityRepository<Comment> for MemoryRepositories {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.comments.read().get(&id).cloned())
    }
}

#[async_trait]
impl CommentRepository for MemoryRepositories {
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        if !self.tasks.read().contains_key(&comment.task_id) {
            return Err(DomainError::TaskNotFound(comment.task_id));
        }
        self.comments.write().insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.comments
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CommentNotFound(id))
    }

    async fn list_by_task(&self, task_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .read()
            .values()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }
}

// ============================================================================
// Time entries
// ============================================================================

#[async_trait]
impl EntityRepository<TimeEntry> for MemoryRepositories {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<TimeEntry>> {
        Ok(self.time_entries.read().get(&id).cloned())
    }
}

#[async_trait]
impl TimeEntryRepository for MemoryRepositories {
    async fn create(&self, entry: &TimeEntry) -> RepoResult<()> {
        if !self.tasks.read().contains_key(&entry.task_id) {
            return Err(DomainError::TaskNotFound(entry.task_id));
        }
        self.time_entries.write().insert(entry.id, entry.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.time_entries
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::TimeEntryNotFound(id))
    }

    async fn list(&self, query: &TimeEntryQuery) -> RepoResult<Vec<TimeEntry>> {
        let mut entries: Vec<TimeEntry> = self
            .time_entries
            .read()
            .values()
            .filter(|e| query.task_id.is_none_or(|id| e.task_id == id))
            .filter(|e| query.user_id.is_none_or(|id| e.user_id == id))
            .cloned()
            .collect();
        entries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(entries)
    }
}

// ============================================================================
// Tags
// ============================================================================

#[async_trait]
impl EntityRepository<Tag> for MemoryRepositories {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tag>> {
        Ok(self.tags.read().get(&id).cloned())
    }
}

#[async_trait]
impl TagRepository for MemoryRepositories {
    async fn create(&self, tag: &Tag) -> RepoResult<()> {
        let mut tags = self.tags.write();
        if tags.values().any(|t| t.name == tag.name) {
            return Err(DomainError::TagNameExists);
        }
        tags.insert(tag.id, tag.clone());
        Ok(())
    }

    async fn update(&self, tag: &Tag) -> RepoResult<()> {
        let mut tags = self.tags.write();
        if tags.values().any(|t| t.name == tag.name && t.id != tag.id) {
            return Err(DomainError::TagNameExists);
        }
        match tags.get_mut(&tag.id) {
            Some(existing) => {
                *existing = tag.clone();
                Ok(())
            }
            None => Err(DomainError::TagNotFound(tag.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tags
            .write()
            .remove(&id)
            .ok_or(DomainError::TagNotFound(id))?;
        for task in self.tasks.write().values_mut() {
            task.tag_ids.retain(|tag_id| *tag_id != id);
        }
        Ok(())
    }

    async fn list(&self) -> RepoResult<Vec<Tag>> {
        let mut tags: Vec<Tag> = self.tags.read().values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

// ============================================================================
// Stats
// ============================================================================

#[async_trait]
impl StatsRepository for MemoryRepositories {
    async fn entity_counts(&self) -> RepoResult<EntityCounts> {
        Ok(EntityCounts {
            users: self.users.read().len() as i64,
            tags: self.tags.read().len() as i64,
            projects: self.projects.read().len() as i64,
            tasks: self.tasks.read().len() as i64,
        })
    }

    async fn task_counts_for(&self, user_id: Snowflake) -> RepoResult<TaskStatusCounts> {
        let mut counts = TaskStatusCounts::default();
        for task in self.tasks.read().values() {
            if task.assigned_to != Some(user_id) {
                continue;
            }
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        Ok(counts)
    }

    async fn minutes_per_day(
        &self,
        user_id: Snowflake,
        range: DateRange,
    ) -> RepoResult<Vec<DailyMinutes>> {
        let mut days = std::collections::BTreeMap::new();
        for entry in self.time_entries.read().values() {
            let day = entry.created_at.date_naive();
            if entry.user_id == user_id && range.contains(day) {
                *days.entry(day).or_insert(0_i64) += i64::from(entry.minutes);
            }
        }
        Ok(days
            .into_iter()
            .map(|(date, total_minutes)| DailyMinutes {
                date,
                total_minutes,
            })
            .collect())
    }
}
