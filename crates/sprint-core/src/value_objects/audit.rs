//! Audit vocabulary: what happened, and to which kind of entity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string does not name a known enum member
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Kind of action recorded in an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    AiSuggest,
}

impl AuditAction {
    pub const ALL: [Self; 6] = [
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::Login,
        Self::Logout,
        Self::AiSuggest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::AiSuggest => "AI_SUGGEST",
        }
    }

    /// Actions that act on an entity which exists before the call
    #[inline]
    pub fn captures_before(&self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "audit action",
                value: s.to_string(),
            })
    }
}

/// Closed set of resource kinds an audit entry can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    User,
    Task,
    Project,
    TimeEntry,
    Comment,
    Tag,
    #[serde(rename = "AIInteraction")]
    AiInteraction,
    Notification,
}

impl EntityType {
    pub const ALL: [Self; 8] = [
        Self::User,
        Self::Task,
        Self::Project,
        Self::TimeEntry,
        Self::Comment,
        Self::Tag,
        Self::AiInteraction,
        Self::Notification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Task => "Task",
            Self::Project => "Project",
            Self::TimeEntry => "TimeEntry",
            Self::Comment => "Comment",
            Self::Tag => "Tag",
            Self::AiInteraction => "AIInteraction",
            Self::Notification => "Notification",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entity| entity.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "entity type",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(AuditAction::AiSuggest.as_str(), "AI_SUGGEST");
        assert_eq!(
            serde_json::to_value(AuditAction::AiSuggest).unwrap(),
            serde_json::json!("AI_SUGGEST")
        );
        for action in AuditAction::ALL {
            assert_eq!(action.as_str().parse::<AuditAction>().unwrap(), action);
            assert_eq!(serde_json::to_value(action).unwrap(), action.as_str());
        }
    }

    #[test]
    fn test_action_parse_is_case_insensitive() {
        assert_eq!("update".parse::<AuditAction>().unwrap(), AuditAction::Update);
        let err = "PATCH".parse::<AuditAction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown audit action: PATCH");
    }

    #[test]
    fn test_only_update_and_delete_capture_before() {
        let capturing: Vec<_> = AuditAction::ALL
            .into_iter()
            .filter(AuditAction::captures_before)
            .collect();
        assert_eq!(capturing, vec![AuditAction::Update, AuditAction::Delete]);
    }

    #[test]
    fn test_entity_type_wire_names() {
        for entity in EntityType::ALL {
            assert_eq!(serde_json::to_value(entity).unwrap(), entity.as_str());
            assert_eq!(entity.as_str().parse::<EntityType>().unwrap(), entity);
        }
        assert!("task".parse::<EntityType>().is_err());
    }
}
