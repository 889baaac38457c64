//! Audit notifications over Redis Pub/Sub.

use async_trait::async_trait;
use serde_json::json;
use sprint_core::entities::{AuditRecord, User};
use sprint_core::error::DomainError;
use sprint_core::traits::{AuditNotifier, NotificationKind, RepoResult};

use crate::pubsub::{PubSubEvent, Publisher};

/// Event type carried by audit notifications
pub const AUDIT_EVENT_TYPE: &str = "AUDIT_LOG";

/// Publishes each audit entry on the recipient's `user:{id}` channel
#[derive(Clone)]
pub struct RedisAuditNotifier {
    publisher: Publisher,
}

impl RedisAuditNotifier {
    #[must_use]
    pub fn new(publisher: Publisher) -> Self {
        Self { publisher }
    }

    /// Payload announcing `record` to `recipient`
    pub fn event(kind: NotificationKind, record: &AuditRecord, recipient: &User) -> PubSubEvent {
        PubSubEvent::new(
            AUDIT_EVENT_TYPE,
            json!({
                "kind": kind.as_str(),
                "recipient_id": recipient.id,
                "record": record,
            }),
        )
    }
}

#[async_trait]
impl AuditNotifier for RedisAuditNotifier {
    async fn deliver(
        &self,
        kind: NotificationKind,
        record: &AuditRecord,
        recipient: &User,
    ) -> RepoResult<()> {
        let event = Self::event(kind, record, recipient);
        self.publisher
            .publish_to_user(recipient.id, &event)
            .await
            .map_err(|e| DomainError::DeliveryError(e.to_string()))?;
        Ok(())
    }
}
