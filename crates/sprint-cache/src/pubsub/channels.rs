//! Pub/Sub channel naming.

use sprint_core::Snowflake;

/// Channel prefix for user-specific events
pub const USER_CHANNEL_PREFIX: &str = "user:";

/// Redis channel carrying events addressed to one user
#[must_use]
pub fn user_channel(user_id: Snowflake) -> String {
    format!("{USER_CHANNEL_PREFIX}{user_id}")
}
