//! Time entry database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for time_entries table
#[derive(Debug, Clone, FromRow)]
pub struct TimeEntryModel {
    pub id: i64,
    pub task_id: i64,
    pub user_id: i64,
    pub minutes: i32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
