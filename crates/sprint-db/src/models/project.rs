//! Project database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for projects table
#[derive(Debug, Clone, FromRow)]
pub struct ProjectModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Stored as its camelCase wire name
    pub status: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_by: i64,
    pub member_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
