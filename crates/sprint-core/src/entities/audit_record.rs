//! Audit record entity - one immutable entry in the audit trail

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::value_objects::{AuditAction, EntityType, Snowflake};

/// A persisted audit entry. Never modified once stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub id: Snowflake,
    pub actor_id: Snowflake,
    pub action: AuditAction,
    pub entity_type: EntityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<JsonValue>,
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// An audit entry waiting to be appended; the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditRecord {
    pub actor_id: Snowflake,
    pub action: AuditAction,
    pub entity_type: EntityType,
    pub entity_id: Option<Snowflake>,
    pub before: Option<JsonValue>,
    pub after: Option<JsonValue>,
    pub metadata: JsonValue,
}

impl NewAuditRecord {
    pub fn new(actor_id: Snowflake, action: AuditAction, entity_type: EntityType) -> Self {
        Self {
            actor_id,
            action,
            entity_type,
            entity_id: None,
            before: None,
            after: None,
            metadata: JsonValue::Object(serde_json::Map::new()),
        }
    }

    /// Attach the identity assigned by the store
    pub fn into_record(self, id: Snowflake, created_at: DateTime<Utc>) -> AuditRecord {
        AuditRecord {
            id,
            actor_id: self.actor_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            before: self.before,
            after: self.after,
            metadata: self.metadata,
            created_at,
        }
    }
}
