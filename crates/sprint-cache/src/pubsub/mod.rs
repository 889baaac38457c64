//! Redis Pub/Sub module.
//!
//! Publishes events to per-user channels.

mod channels;
mod publisher;

pub use channels::{user_channel, USER_CHANNEL_PREFIX};
pub use publisher::{PubSubEvent, Publisher};
