//! Comment entity - discussion attached to a task

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: Snowflake,
    pub task_id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: Snowflake, task_id: Snowflake, author_id: Snowflake, text: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            task_id,
            author_id,
            text,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}
