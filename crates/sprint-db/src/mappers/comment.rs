//! Comment entity <-> model mapper

use sprint_core::entities::Comment;
use sprint_core::value_objects::Snowflake;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            task_id: Snowflake::new(model.task_id),
            author_id: Snowflake::new(model.author_id),
            text: model.text,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
