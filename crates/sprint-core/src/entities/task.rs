//! Task entity - the unit of work being tracked

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Workflow state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "inProgress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub total_minutes: i32,
    pub project_id: Option<Snowflake>,
    pub assigned_to: Option<Snowflake>,
    pub created_by: Snowflake,
    pub tag_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: Snowflake, title: String, created_by: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: None,
            status: TaskStatus::Todo,
            total_minutes: 0,
            project_id: None,
            assigned_to: None,
            created_by,
            tag_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Add logged minutes to the running total
    pub fn add_minutes(&mut self, minutes: i32) -> Result<(), DomainError> {
        if minutes < 0 {
            return Err(DomainError::NegativeMinutes);
        }
        self.total_minutes = self.total_minutes.saturating_add(minutes);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove logged minutes, never dropping below zero
    pub fn remove_minutes(&mut self, minutes: i32) {
        self.total_minutes = (self.total_minutes - minutes.max(0)).max(0);
        self.updated_at = Utc::now();
    }
}
