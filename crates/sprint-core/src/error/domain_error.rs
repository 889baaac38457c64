//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Project not found: {0}")]
    ProjectNotFound(Snowflake),

    #[error("Task not found: {0}")]
    TaskNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Time entry not found: {0}")]
    TimeEntryNotFound(Snowflake),

    #[error("Tag not found: {0}")]
    TagNotFound(Snowflake),

    #[error("Audit log not found: {0}")]
    AuditLogNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Minutes must be non-negative")]
    NegativeMinutes,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Administrator privileges required")]
    AdminRequired,

    #[error("Not comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Tag name already in use")]
    TagNameExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Notification delivery failed: {0}")]
    DeliveryError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProjectNotFound(_) => "UNKNOWN_PROJECT",
            Self::TaskNotFound(_) => "UNKNOWN_TASK",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::TimeEntryNotFound(_) => "UNKNOWN_TIME_ENTRY",
            Self::TagNotFound(_) => "UNKNOWN_TAG",
            Self::AuditLogNotFound(_) => "UNKNOWN_AUDIT_LOG",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::NegativeMinutes => "NEGATIVE_MINUTES",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::TagNameExists => "TAG_NAME_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::DeliveryError(_) => "DELIVERY_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::TaskNotFound(_)
                | Self::CommentNotFound(_)
                | Self::TimeEntryNotFound(_)
                | Self::TagNotFound(_)
                | Self::AuditLogNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidStatus(_)
                | Self::NegativeMinutes
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AdminRequired | Self::NotCommentAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::TagNameExists)
    }
}
