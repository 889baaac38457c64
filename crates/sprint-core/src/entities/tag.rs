//! Tag entity - a colored label attached to tasks

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: Snowflake,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    pub const DEFAULT_COLOR: &'static str = "#CCCCCC";

    pub fn new(id: Snowflake, name: String, created_by: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            color: Self::DEFAULT_COLOR.to_string(),
            description: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color() {
        let tag = Tag::new(Snowflake::new(1), "bug".to_string(), Snowflake::new(2));
        assert_eq!(tag.color, "#CCCCCC");
        assert!(tag.description.is_none());
    }
}
