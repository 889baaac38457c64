//! Handler-facing view of one invocation's audit scratch state

use std::convert::Infallible;
use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value as JsonValue;
use sprint_core::Snowflake;
use sprint_service::AuditScratch;

/// Per-request audit scratch, shared between the audit layer and the handler.
///
/// The layer inserts a fresh scope into each request's extensions. Handlers
/// extract it to read the before-snapshot and to report what they produced.
/// A handler mounted without the layer gets a detached scope whose writes go
/// nowhere, so handlers behave the same either way.
#[derive(Debug, Clone, Default)]
pub struct AuditScope(Arc<Mutex<AuditScratch>>);

impl AuditScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the target entity taken before the handler ran
    pub fn before(&self) -> Option<JsonValue> {
        self.0.lock().before().cloned()
    }

    pub fn created<T: Serialize + ?Sized>(&self, entity: &T) {
        self.0.lock().record_created(entity);
    }

    pub fn updated<T: Serialize + ?Sized>(&self, entity: &T) {
        self.0.lock().record_updated(entity);
    }

    /// Attribute the event to `actor` when the request is unauthenticated
    pub fn set_actor(&self, actor: Snowflake) {
        self.0.lock().set_actor(actor);
    }

    pub(crate) fn set_before(&self, snapshot: Option<JsonValue>) {
        self.0.lock().set_before(snapshot);
    }

    pub(crate) fn take(&self) -> AuditScratch {
        std::mem::take(&mut *self.0.lock())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuditScope
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<AuditScope>().cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clones_share_state() {
        let scope = AuditScope::new();
        let handler_view = scope.clone();
        handler_view.created(&json!({"id": "7"}));
        handler_view.set_actor(Snowflake::new(7));

        let scratch = scope.take();
        assert_eq!(scratch.resolve_after(), Some(&json!({"id": "7"})));
        assert_eq!(scratch.resolve_actor(None), Some(Snowflake::new(7)));
        assert!(scope.take().resolve_after().is_none());
    }

    #[tokio::test]
    async fn test_detached_scope_without_layer() {
        let (mut parts, ()) = axum::http::Request::new(()).into_parts();
        let scope = AuditScope::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(scope.before().is_none());
        scope.updated(&json!({"status": "done"}));
    }
}
