//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use sprint_core::entities::{UserPreferences, UserProfile};
use sprint_core::{AuditAction, EntityType, Page, ProjectStatus, Snowflake, TaskStatus};

// ============================================================================
// Common Response Types
// ============================================================================

/// Page-numbered list response
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub data: Vec<T>,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, window: Page, total: i64) -> Self {
        let limit = u32::try_from(window.limit).unwrap_or(u32::MAX);
        let page = u32::try_from(window.offset / window.limit.max(1) + 1).unwrap_or(1);
        Self {
            page,
            limit,
            total,
            data,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with an access token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub profile: UserProfile,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Confirmation body for actions with nothing else to return
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Project Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: Snowflake,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub created_by: Snowflake,
    pub member_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Task Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: Snowflake,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub total_minutes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Snowflake>,
    pub created_by: Snowflake,
    pub tag_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Snowflake,
    pub task_id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Time Entry Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntryResponse {
    pub id: Snowflake,
    pub task_id: Snowflake,
    pub user_id: Snowflake,
    pub minutes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Tag Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: Snowflake,
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Audit Log Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AuditLogResponse {
    pub id: Snowflake,
    pub actor_id: Snowflake,
    /// `None` once the acting account has been deleted
    pub actor: Option<ActorSummary>,
    pub action: AuditAction,
    pub entity_type: EntityType,
    pub entity_id: Option<Snowflake>,
    pub before: Option<JsonValue>,
    pub after: Option<JsonValue>,
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// Who performed an audited action
#[derive(Debug, Clone, Serialize)]
pub struct ActorSummary {
    pub id: Snowflake,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

// ============================================================================
// Stats Responses
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdminStatsResponse {
    pub users: i64,
    pub tags: i64,
    pub projects: i64,
    pub tasks: i64,
}

/// The caller's assigned tasks by status
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UserStatsResponse {
    pub todo: i64,
    pub in_progress: i64,
    pub done: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyMinutesResponse {
    pub date: NaiveDate,
    pub total_minutes: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    /// `redis_healthy` is `None` when Redis is disabled
    pub fn ready(database_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = database_healthy && redis_healthy.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: health_label(database_healthy).to_string(),
                redis: redis_healthy.map_or("disabled", health_label).to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

fn health_label(healthy: bool) -> &'static str {
    if healthy {
        "healthy"
    } else {
        "unhealthy"
    }
}
