//! Task database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tasks table
#[derive(Debug, Clone, FromRow)]
pub struct TaskModel {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub total_minutes: i32,
    pub project_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub created_by: i64,
    pub tag_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
