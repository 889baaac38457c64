//! Service context - dependency container for services
//!
//! Holds all repositories, the token service, the id generator and the
//! auditor shared by every request.

use std::sync::Arc;

use sprint_common::auth::JwtService;
use sprint_core::entities::{Comment, Project, Tag, Task, TimeEntry, User};
use sprint_core::traits::{
    AdminDirectory, AuditLogRepository, AuditNotifier, CommentRepository, ProjectRepository,
    StatsRepository, TagRepository, TaskRepository, TimeEntryRepository, UserRepository,
};
use sprint_core::{EntityType, Snowflake, SnowflakeGenerator};

use crate::audit::{Auditor, LoggingNotifier, NotificationFanout, SnapshotRegistry};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Everything in it is built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    task_repo: Arc<dyn TaskRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    time_entry_repo: Arc<dyn TimeEntryRepository>,
    tag_repo: Arc<dyn TagRepository>,
    audit_log_repo: Arc<dyn AuditLogRepository>,
    stats_repo: Arc<dyn StatsRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    auditor: Arc<Auditor>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn project_repo(&self) -> &dyn ProjectRepository {
        self.project_repo.as_ref()
    }

    pub fn task_repo(&self) -> &dyn TaskRepository {
        self.task_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn time_entry_repo(&self) -> &dyn TimeEntryRepository {
        self.time_entry_repo.as_ref()
    }

    pub fn tag_repo(&self) -> &dyn TagRepository {
        self.tag_repo.as_ref()
    }

    pub fn audit_log_repo(&self) -> &dyn AuditLogRepository {
        self.audit_log_repo.as_ref()
    }

    pub fn stats_repo(&self) -> &dyn StatsRepository {
        self.stats_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Shared handle to the auditor used by the interception layer
    pub fn auditor(&self) -> Arc<Auditor> {
        Arc::clone(&self.auditor)
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("auditor", &self.auditor)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    project_repo: Option<Arc<dyn ProjectRepository>>,
    task_repo: Option<Arc<dyn TaskRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    time_entry_repo: Option<Arc<dyn TimeEntryRepository>>,
    tag_repo: Option<Arc<dyn TagRepository>>,
    audit_log_repo: Option<Arc<dyn AuditLogRepository>>,
    stats_repo: Option<Arc<dyn StatsRepository>>,
    admin_directory: Option<Arc<dyn AdminDirectory>>,
    audit_notifier: Option<Arc<dyn AuditNotifier>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn project_repo(mut self, repo: Arc<dyn ProjectRepository>) -> Self {
        self.project_repo = Some(repo);
        self
    }

    pub fn task_repo(mut self, repo: Arc<dyn TaskRepository>) -> Self {
        self.task_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn time_entry_repo(mut self, repo: Arc<dyn TimeEntryRepository>) -> Self {
        self.time_entry_repo = Some(repo);
        self
    }

    pub fn tag_repo(mut self, repo: Arc<dyn TagRepository>) -> Self {
        self.tag_repo = Some(repo);
        self
    }

    pub fn audit_log_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_log_repo = Some(repo);
        self
    }

    pub fn stats_repo(mut self, repo: Arc<dyn StatsRepository>) -> Self {
        self.stats_repo = Some(repo);
        self
    }

    /// Source of audit notification recipients
    pub fn admin_directory(mut self, directory: Arc<dyn AdminDirectory>) -> Self {
        self.admin_directory = Some(directory);
        self
    }

    /// Defaults to [`LoggingNotifier`] when unset
    pub fn audit_notifier(mut self, notifier: Arc<dyn AuditNotifier>) -> Self {
        self.audit_notifier = Some(notifier);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext and its auditor
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let user_repo = required(self.user_repo, "user_repo")?;
        let project_repo = required(self.project_repo, "project_repo")?;
        let task_repo = required(self.task_repo, "task_repo")?;
        let comment_repo = required(self.comment_repo, "comment_repo")?;
        let time_entry_repo = required(self.time_entry_repo, "time_entry_repo")?;
        let tag_repo = required(self.tag_repo, "tag_repo")?;
        let audit_log_repo = required(self.audit_log_repo, "audit_log_repo")?;
        let stats_repo = required(self.stats_repo, "stats_repo")?;
        let admin_directory = required(self.admin_directory, "admin_directory")?;
        let notifier = self
            .audit_notifier
            .unwrap_or_else(|| Arc::new(LoggingNotifier));

        let registry = SnapshotRegistry::new()
            .register::<User, dyn UserRepository>(EntityType::User, user_repo.clone())
            .register::<Project, dyn ProjectRepository>(EntityType::Project, project_repo.clone())
            .register::<Task, dyn TaskRepository>(EntityType::Task, task_repo.clone())
            .register::<Comment, dyn CommentRepository>(EntityType::Comment, comment_repo.clone())
            .register::<TimeEntry, dyn TimeEntryRepository>(
                EntityType::TimeEntry,
                time_entry_repo.clone(),
            )
            .register::<Tag, dyn TagRepository>(EntityType::Tag, tag_repo.clone());

        let auditor = Auditor::new(
            registry,
            audit_log_repo.clone(),
            NotificationFanout::new(admin_directory, notifier),
        );

        Ok(ServiceContext {
            user_repo,
            project_repo,
            task_repo,
            comment_repo,
            time_entry_repo,
            tag_repo,
            audit_log_repo,
            stats_repo,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            auditor: Arc::new(auditor),
        })
    }
}

fn required<T>(value: Option<T>, name: &'static str) -> ServiceResult<T> {
    value.ok_or(ServiceError::MissingDependency(name))
}
