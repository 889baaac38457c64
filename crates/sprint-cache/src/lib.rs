//! # sprint-cache
//!
//! Redis layer for pub/sub delivery of audit notifications.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: Per-user event channels
//! - **Audit Notifier**: Publishes each new audit entry to an administrator's channel
//!
//! ## Example
//!
//! ```ignore
//! use sprint_cache::{RedisAuditNotifier, RedisPool, Publisher};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let notifier = RedisAuditNotifier::new(Publisher::new(pool));
//!
//! // Deliver to one administrator
//! notifier.deliver(NotificationKind::Audit, &record, &admin).await?;
//! ```

pub mod notifier;
pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolError, RedisResult};

// Re-export pubsub types
pub use pubsub::{user_channel, PubSubEvent, Publisher, USER_CHANNEL_PREFIX};

pub use notifier::{RedisAuditNotifier, AUDIT_EVENT_TYPE};
