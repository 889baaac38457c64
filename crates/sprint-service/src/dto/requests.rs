//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! List queries are deserialized from the query string.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use sprint_core::entities::{UserPreferences, UserProfile};
use sprint_core::{AuditAction, EntityType, Page, ProjectStatus, Snowflake, TaskStatus};
use validator::{Validate, ValidationError};

/// Page size used when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Resolve 1-based `page` / `limit` query values into a window
pub fn page_window(page: Option<u32>, limit: Option<u32>) -> Page {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    Page::numbered(page.unwrap_or(1), limit)
}

fn validate_color(color: &str) -> Result<(), ValidationError> {
    let hex = color.strip_prefix('#').unwrap_or_default();
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::new("color").with_message("Color must be a hex value like #A1B2C3".into()))
    }
}

fn validate_preferences(preferences: &UserPreferences) -> Result<(), ValidationError> {
    if (1..=MAX_PAGE_SIZE).contains(&preferences.items_per_page) {
        Ok(())
    } else {
        Err(ValidationError::new("items_per_page")
            .with_message(format!("Items per page must be 1-{MAX_PAGE_SIZE}").into()))
    }
}

fn validate_object(value: &JsonValue) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("object").with_message("Metadata must be a JSON object".into()))
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Account signup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update own profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: Option<String>,

    pub profile: Option<UserProfile>,

    #[validate(custom(function = "validate_preferences"))]
    pub preferences: Option<UserPreferences>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

/// Administrator update of any account
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: Option<String>,

    pub profile: Option<UserProfile>,

    #[validate(custom(function = "validate_preferences"))]
    pub preferences: Option<UserPreferences>,

    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ============================================================================
// Project Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub status: Option<ProjectStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    /// Additional members; the creator is always a member
    #[serde(default)]
    pub member_ids: Vec<Snowflake>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub status: Option<ProjectStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub member_ids: Option<Vec<Snowflake>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProjectStatusRequest {
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ProjectStatus>,
}

// ============================================================================
// Task Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub project_id: Option<Snowflake>,
    pub assigned_to: Option<Snowflake>,

    #[serde(default)]
    pub tag_ids: Vec<Snowflake>,
}

/// Partial task update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
    pub project_id: Option<Snowflake>,
    pub assigned_to: Option<Snowflake>,
    pub tag_ids: Option<Vec<Snowflake>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// Minutes to add to a task's running total
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTimeRequest {
    #[validate(range(min = 0, message = "Minutes must be non-negative"))]
    pub minutes: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<TaskStatus>,
    pub project_id: Option<Snowflake>,
    pub assigned_to: Option<Snowflake>,
    pub title: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub task_id: Snowflake,

    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub text: String,
}

// ============================================================================
// Time Entry Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTimeEntryRequest {
    pub task_id: Snowflake,

    #[validate(range(min = 1, message = "Minutes must be at least 1"))]
    pub minutes: i32,

    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntryListQuery {
    pub task_id: Option<Snowflake>,
    pub user_id: Option<Snowflake>,
}

// ============================================================================
// Tag Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Tag name must be 1-50 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Tag name must be 1-50 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

// ============================================================================
// Audit Log Requests
// ============================================================================

/// Admin audit listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub actor_id: Option<Snowflake>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Snowflake>,
    pub action: Option<AuditAction>,
}

/// Administrator-submitted audit entry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAuditLogRequest {
    pub action: AuditAction,
    pub entity_type: EntityType,
    pub entity_id: Option<Snowflake>,
    pub before: Option<JsonValue>,
    pub after: Option<JsonValue>,

    #[validate(custom(function = "validate_object"))]
    pub metadata: Option<JsonValue>,
}

// ============================================================================
// Stats Requests
// ============================================================================

/// Inclusive UTC day bounds, both optional
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TimePerDayQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
