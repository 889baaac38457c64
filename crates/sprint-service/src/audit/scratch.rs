//! Per-invocation audit scratch state
//!
//! One `AuditScratch` exists per intercepted request. The interception layer
//! writes `before`; the handler writes `created`/`updated` and, when no
//! session exists yet, an actor override.

use serde::Serialize;
use serde_json::Value as JsonValue;
use sprint_core::Snowflake;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditScratch {
    before: Option<JsonValue>,
    created: Option<JsonValue>,
    updated: Option<JsonValue>,
    actor_override: Option<Snowflake>,
}

impl AuditScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-invocation snapshot of the target entity
    pub fn before(&self) -> Option<&JsonValue> {
        self.before.as_ref()
    }

    pub fn set_before(&mut self, snapshot: Option<JsonValue>) {
        self.before = snapshot;
    }

    /// Record the entity a CREATE handler produced
    pub fn record_created<T: Serialize + ?Sized>(&mut self, entity: &T) {
        self.created = snapshot(entity);
    }

    /// Record the entity state an UPDATE or DELETE handler left behind
    pub fn record_updated<T: Serialize + ?Sized>(&mut self, entity: &T) {
        self.updated = snapshot(entity);
    }

    /// Attribute the event to `actor` when the request carries no identity
    pub fn set_actor(&mut self, actor: Snowflake) {
        self.actor_override = Some(actor);
    }

    /// After-state: the created snapshot if present, else the updated one
    pub fn resolve_after(&self) -> Option<&JsonValue> {
        self.created.as_ref().or(self.updated.as_ref())
    }

    /// Authenticated identity first, then the handler's override
    pub fn resolve_actor(&self, authenticated: Option<Snowflake>) -> Option<Snowflake> {
        authenticated.or(self.actor_override)
    }
}

fn snapshot<T: Serialize + ?Sized>(entity: &T) -> Option<JsonValue> {
    match serde_json::to_value(entity) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Failed to snapshot entity for audit");
            None
        }
    }
}
