//! Shared fixtures for service tests

use std::sync::Arc;

use sprint_common::auth::JwtService;
use sprint_core::entities::User;
use sprint_core::traits::UserRepository;
use sprint_core::SnowflakeGenerator;

use crate::audit::InMemoryAuditLog;
use crate::memory::MemoryRepositories;

use super::context::ServiceContext;

pub struct Fixture {
    pub ctx: ServiceContext,
    pub repos: Arc<MemoryRepositories>,
    pub audit_log: Arc<InMemoryAuditLog>,
}

impl Fixture {
    pub fn new() -> Self {
        let repos = MemoryRepositories::shared();
        let audit_log = InMemoryAuditLog::shared();
        let ctx = repos
            .context_builder()
            .audit_log_repo(audit_log.clone())
            .jwt_service(Arc::new(JwtService::new("service-test-secret-0123456789abcdef", 900)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap();

        Self {
            ctx,
            repos,
            audit_log,
        }
    }

    pub async fn user(&self, email: &str, admin: bool) -> User {
        let mut user = User::new(
            self.ctx.generate_id(),
            email.to_string(),
            "Test".to_string(),
            "User".to_string(),
        );
        user.set_admin(admin);
        UserRepository::create(self.repos.as_ref(), &user, "not-a-real-hash")
            .await
            .unwrap();
        user
    }
}
