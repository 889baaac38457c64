//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1. Mutating
//! routes carry an [`AuditLayer`] naming the entity and action they record.

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use sprint_core::{AuditAction, EntityType};
use sprint_service::Auditor;

use crate::audit::AuditLayer;
use crate::handlers::{
    audit_logs, auth, comments, health, projects, stats, tags, tasks, time_entries, users,
};
use crate::middleware::authenticate;
use crate::state::AppState;

/// Builds the audit layers for one entity type
#[derive(Clone)]
struct Audit {
    auditor: Arc<Auditor>,
    entity_type: EntityType,
}

impl Audit {
    fn new(state: &AppState, entity_type: EntityType) -> Self {
        Self {
            auditor: state.service_context().auditor(),
            entity_type,
        }
    }

    fn layer(&self, action: AuditAction) -> AuditLayer {
        AuditLayer::new(self.auditor.clone(), self.entity_type, action)
    }

    fn create(&self) -> AuditLayer {
        self.layer(AuditAction::Create)
    }

    fn update(&self) -> AuditLayer {
        self.layer(AuditAction::Update)
    }

    fn delete(&self) -> AuditLayer {
        self.layer(AuditAction::Delete)
    }
}

/// Create the main API router (health routes are separate)
///
/// Signup and login sit outside the bearer check, so a stale token sent
/// along with them is ignored.
pub fn create_router(state: &AppState) -> Router<AppState> {
    let authenticated =
        api_v1_routes(state).layer(from_fn_with_state(state.clone(), authenticate));
    Router::new().nest("/api/v1", auth_routes(state).merge(authenticated))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(user_routes(state))
        .merge(project_routes(state))
        .merge(task_routes(state))
        .merge(comment_routes(state))
        .merge(time_entry_routes(state))
        .merge(tag_routes(state))
        .merge(audit_log_routes())
        .merge(stats_routes())
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    let audit = Audit::new(state, EntityType::User);
    Router::new()
        .route("/auth/signup", post(auth::signup).route_layer(audit.create()))
        .route(
            "/auth/login",
            post(auth::login).route_layer(audit.layer(AuditAction::Login)),
        )
}

fn user_routes(state: &AppState) -> Router<AppState> {
    let audit = Audit::new(state, EntityType::User);
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/@me", get(users::get_current_user))
        .route(
            "/users/@me",
            patch(users::update_current_user).route_layer(audit.update().target_current_user()),
        )
        .route(
            "/users/@me/change-password",
            post(users::change_password).route_layer(audit.update().target_current_user()),
        )
        .route("/users/:id", get(users::get_user))
        .route("/users/:id", patch(users::update_user).route_layer(audit.update()))
        .route("/users/:id", delete(users::delete_user).route_layer(audit.delete()))
}

fn project_routes(state: &AppState) -> Router<AppState> {
    let audit = Audit::new(state, EntityType::Project);
    Router::new()
        .route("/projects", get(projects::list_projects))
        .route("/projects", post(projects::create_project).route_layer(audit.create()))
        .route("/projects/:id", get(projects::get_project))
        .route("/projects/:id", put(projects::update_project).route_layer(audit.update()))
        .route("/projects/:id", delete(projects::delete_project).route_layer(audit.delete()))
        .route(
            "/projects/:id/status",
            patch(projects::change_status).route_layer(audit.update()),
        )
}

fn task_routes(state: &AppState) -> Router<AppState> {
    let audit = Audit::new(state, EntityType::Task);
    Router::new()
        .route("/tasks", get(tasks::list_tasks))
        .route("/tasks", post(tasks::create_task).route_layer(audit.create()))
        .route("/tasks/:id", get(tasks::get_task))
        .route("/tasks/:id", put(tasks::update_task).route_layer(audit.update()))
        .route("/tasks/:id", delete(tasks::delete_task).route_layer(audit.delete()))
        .route(
            "/tasks/:id/status",
            patch(tasks::change_status).route_layer(audit.update()),
        )
        .route("/tasks/:id/time", patch(tasks::add_time).route_layer(audit.update()))
}

fn comment_routes(state: &AppState) -> Router<AppState> {
    let audit = Audit::new(state, EntityType::Comment);
    Router::new()
        .route("/comments", post(comments::create_comment).route_layer(audit.create()))
        .route("/comments/task/:task_id", get(comments::list_for_task))
        .route("/comments/:id", delete(comments::delete_comment).route_layer(audit.delete()))
}

fn time_entry_routes(state: &AppState) -> Router<AppState> {
    let audit = Audit::new(state, EntityType::TimeEntry);
    Router::new()
        .route("/time-entries", get(time_entries::list_entries))
        .route(
            "/time-entries",
            post(time_entries::create_entry).route_layer(audit.create()),
        )
        .route("/time-entries/:id", get(time_entries::get_entry))
        .route(
            "/time-entries/:id",
            delete(time_entries::delete_entry).route_layer(audit.delete()),
        )
}

fn tag_routes(state: &AppState) -> Router<AppState> {
    let audit = Audit::new(state, EntityType::Tag);
    Router::new()
        .route("/tags", get(tags::list_tags))
        .route("/tags", post(tags::create_tag).route_layer(audit.create()))
        .route("/tags/:id", get(tags::get_tag))
        .route("/tags/:id", put(tags::update_tag).route_layer(audit.update()))
        .route("/tags/:id", delete(tags::delete_tag).route_layer(audit.delete()))
}

fn audit_log_routes() -> Router<AppState> {
    Router::new()
        .route("/audit-logs", get(audit_logs::list_logs).post(audit_logs::create_log))
        .route("/audit-logs/:id", get(audit_logs::get_log))
}

fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/admin", get(stats::admin_stats))
        .route("/stats/me", get(stats::my_stats))
        .route("/stats/time-per-day", get(stats::time_per_day))
}
