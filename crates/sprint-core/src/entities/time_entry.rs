//! Time entry entity - minutes logged against a task

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntry {
    pub id: Snowflake,
    pub task_id: Snowflake,
    pub user_id: Snowflake,
    pub minutes: i32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimeEntry {
    pub fn new(id: Snowflake, task_id: Snowflake, user_id: Snowflake, minutes: i32) -> Self {
        Self {
            id,
            task_id,
            user_id,
            minutes,
            start_time: None,
            end_time: None,
            notes: None,
            created_at: Utc::now(),
        }
    }
}
