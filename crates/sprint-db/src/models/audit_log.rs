//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for audit_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    pub actor_id: i64,
    /// SCREAMING_SNAKE_CASE action name
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    /// Entity snapshot prior to the change
    pub before: Option<JsonValue>,
    /// Entity snapshot after the change
    pub after: Option<JsonValue>,
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
}
