//! In-process application for router tests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value as JsonValue;
use sprint_common::JwtService;
use sprint_core::entities::{AuditRecord, User};
use sprint_core::traits::UserRepository;
use sprint_core::SnowflakeGenerator;
use sprint_service::audit::InMemoryAuditLog;
use sprint_service::memory::MemoryRepositories;
use tower::ServiceExt;

use crate::routes::{create_router, health_routes};
use crate::state::AppState;

pub(crate) struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub repos: Arc<MemoryRepositories>,
    pub audit_log: Arc<InMemoryAuditLog>,
}

impl TestApp {
    pub fn new() -> Self {
        let repos = MemoryRepositories::shared();
        let audit_log = InMemoryAuditLog::shared();
        let ctx = repos
            .context_builder()
            .audit_log_repo(audit_log.clone())
            .jwt_service(Arc::new(JwtService::new("api-test-secret-0123456789abcdefgh", 900)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(2)))
            .build()
            .unwrap();
        let state = AppState::new(ctx);
        let router = create_router(&state)
            .merge(health_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            repos,
            audit_log,
        }
    }

    /// Seed a user and return it with a bearer token
    pub async fn user(&self, email: &str, admin: bool) -> (User, String) {
        let mut user = User::new(
            self.state.service_context().generate_id(),
            email.to_string(),
            "Test".to_string(),
            "User".to_string(),
        );
        user.set_admin(admin);
        UserRepository::create(self.repos.as_ref(), &user, "not-a-real-hash")
            .await
            .unwrap();
        let token = self.state.jwt_service().issue(user.id, admin).unwrap();
        (user, token.access_token)
    }

    /// Send a request and read the whole body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, JsonValue) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Wait for the detached audit tasks to store `count` records
    pub async fn records(&self, count: usize) -> Vec<AuditRecord> {
        for _ in 0..100 {
            if self.audit_log.len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let records = self.audit_log.records();
        assert_eq!(records.len(), count, "unexpected audit records: {records:?}");
        records
    }

    /// Give any stray audit task time to run, then expect none
    pub async fn assert_no_records(&self) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(self.audit_log.is_empty(), "{:?}", self.audit_log.records());
    }
}

pub(crate) fn request(method: Method, uri: &str, token: Option<&str>, body: Option<JsonValue>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
