//! Project entity - groups tasks and members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::OnHold => "onHold",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "active" => Ok(Self::Active),
            "onHold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_by: Snowflake,
    pub member_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(id: Snowflake, name: String, created_by: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description: None,
            status: ProjectStatus::Planned,
            start_date: None,
            end_date: None,
            created_by,
            member_ids: vec![created_by],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// End date must not precede start date when both are set
    pub fn validate_dates(&self) -> Result<(), DomainError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end < start => Err(DomainError::ValidationError(
                "end_date must not be before start_date".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
