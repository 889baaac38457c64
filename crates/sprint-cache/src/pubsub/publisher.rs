//! Redis Pub/Sub publisher.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::user_channel;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "AUDIT_LOG")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel, returning the number of receivers
    pub async fn publish(&self, channel: &str, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(channel, &payload).await?;

        tracing::debug!(
            channel = %channel,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a user-specific event
    pub async fn publish_to_user(
        &self,
        user_id: sprint_core::Snowflake,
        event: &PubSubEvent,
    ) -> RedisResult<u32> {
        self.publish(&user_channel(user_id), event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubsub_event_creation() {
        let data = serde_json::json!({"id": "12345"});
        let event = PubSubEvent::new("AUDIT_LOG", data.clone());
        assert_eq!(event.event_type, "AUDIT_LOG");
        assert_eq!(event.data, data);
    }

    #[test]
    fn test_event_serialization() {
        let event = PubSubEvent::new("TEST_EVENT", serde_json::json!({"content": "test"}));
        let json = event.to_json().unwrap();
        let back: PubSubEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_type, "TEST_EVENT");
        assert_eq!(back.data["content"], "test");
    }
}
