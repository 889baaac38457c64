//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;
use sprint_core::AuditAction;

async fn signup(server: &TestServer) -> AuthResponse {
    let request = SignupRequest::unique();
    let response = server.post("/auth/signup", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_records_self_attributed_create() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    let response = server.post("/auth/signup", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.user.is_admin);

    let records = server.audit_records(&auth.user.id, 1).await.unwrap();
    assert_eq!(records[0].action, AuditAction::Create);
    assert_eq!(records[0].actor_id.to_string(), auth.user.id);
    assert!(records[0].before.is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    server.post("/auth/signup", &request).await.unwrap();

    let response = server.post("/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup_req = SignupRequest::unique();
    server.post("/auth/signup", &signup_req).await.unwrap();

    let login_req = LoginRequest::from_signup(&signup_req);
    let response = server.post("/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.email, signup_req.email);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/auth/login", &login_req).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert!(!error.error.code.is_empty());
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;

    let response = server.get_auth("/users/@me", &auth.access_token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, auth.user.id);
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_auth("/users/@me", "invalid-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_non_admin_cannot_read_audit_logs() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;

    let response = server.get_auth("/audit-logs", &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Task Audit Tests
// ============================================================================

#[tokio::test]
async fn test_task_lifecycle_is_audited() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let token = &auth.access_token;

    let request = CreateTaskRequest::unique();
    let response = server.post_auth("/tasks", token, &request).await.unwrap();
    let task: TaskResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(task.title, request.title);
    assert_eq!(task.status, "todo");
    assert_eq!(task.created_by, auth.user.id);

    let records = server.audit_records(&task.id, 1).await.unwrap();
    assert_eq!(records[0].action, AuditAction::Create);
    let after = records[0].after.as_ref().expect("create stores the new task");
    assert_eq!(after["title"], request.title.as_str());

    let response = server
        .put_auth(&format!("/tasks/{}", task.id), token, &json!({"title": "Renamed"}))
        .await
        .unwrap();
    let updated: TaskResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Renamed");

    let records = server.audit_records(&task.id, 2).await.unwrap();
    let update = &records[0];
    assert_eq!(update.action, AuditAction::Update);
    assert_eq!(update.before.as_ref().unwrap()["title"], request.title.as_str());
    assert_eq!(update.after.as_ref().unwrap()["title"], "Renamed");

    let response = server
        .delete_auth(&format!("/tasks/{}", task.id), token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let records = server.audit_records(&task.id, 3).await.unwrap();
    let deletion = &records[0];
    assert_eq!(deletion.action, AuditAction::Delete);
    assert_eq!(deletion.before.as_ref().unwrap()["title"], "Renamed");
    assert!(deletion.after.is_none());
}

#[tokio::test]
async fn test_failed_update_is_not_audited() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let token = &auth.access_token;

    let response = server
        .post_auth("/tasks", token, &CreateTaskRequest::unique())
        .await
        .unwrap();
    let task: TaskResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    server.audit_records(&task.id, 1).await.unwrap();

    let response = server
        .put_auth(&format!("/tasks/{}", task.id), token, &json!({"title": ""}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    let records = server.audit_records(&task.id, 1).await.unwrap();
    assert_eq!(records.len(), 1);
}

// ============================================================================
// Project Tests
// ============================================================================

#[tokio::test]
async fn test_create_project_adds_creator_as_member() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;

    let request = CreateProjectRequest::unique();
    let response = server
        .post_auth("/projects", &auth.access_token, &request)
        .await
        .unwrap();
    let project: ProjectResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(project.name, request.name);
    assert_eq!(project.created_by, auth.user.id);
    assert!(project.member_ids.contains(&auth.user.id));

    let response = server
        .patch_auth(
            &format!("/projects/{}/status", project.id),
            &auth.access_token,
            &json!({"status": "completed"}),
        )
        .await
        .unwrap();
    let project: ProjectResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(project.status, "completed");

    let records = server.audit_records(&project.id, 2).await.unwrap();
    assert_eq!(records[0].action, AuditAction::Update);
}

// ============================================================================
// Account and Stats Tests
// ============================================================================

#[tokio::test]
async fn test_change_password_then_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();
    let response = server.post("/auth/signup", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let change = json!({"current_password": request.password, "new_password": "Rotated2025"});
    let response = server
        .post_auth("/users/@me/change-password", &auth.access_token, &change)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let records = server.audit_records(&auth.user.id, 2).await.unwrap();
    assert_eq!(records[0].action, AuditAction::Update);

    let login = json!({"email": request.email, "password": "Rotated2025"});
    let response = server.post("/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_personal_stats_from_database() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let token = &auth.access_token;

    let body = json!({"title": "Stats task", "assigned_to": auth.user.id});
    let response = server.post_auth("/tasks", token, &body).await.unwrap();
    let task: TaskResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let entry = json!({"task_id": task.id, "minutes": 25});
    let response = server.post_auth("/time-entries", token, &entry).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth("/stats/me", token).await.unwrap();
    let stats: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats, json!({"todo": 1, "in_progress": 0, "done": 0}));

    let response = server.get_auth("/stats/time-per-day", token).await.unwrap();
    let days: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(days.as_array().unwrap().len(), 1);
    assert_eq!(days[0]["total_minutes"], 25);
}
