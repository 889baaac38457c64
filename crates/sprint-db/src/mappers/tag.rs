//! Tag entity <-> model mapper

use sprint_core::entities::Tag;
use sprint_core::value_objects::Snowflake;

use crate::models::TagModel;

impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag {
            id: Snowflake::new(model.id),
            name: model.name,
            color: model.color,
            description: model.description,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
