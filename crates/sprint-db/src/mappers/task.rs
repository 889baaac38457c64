//! Task entity <-> model mapper

use sprint_core::entities::Task;
use sprint_core::error::DomainError;
use sprint_core::value_objects::Snowflake;

use super::{corrupt_column, snowflakes};
use crate::models::TaskModel;

impl TryFrom<TaskModel> for Task {
    type Error = DomainError;

    fn try_from(model: TaskModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse()
            .map_err(|e| corrupt_column("tasks", "status", e))?;

        Ok(Task {
            id: Snowflake::new(model.id),
            title: model.title,
            description: model.description,
            status,
            total_minutes: model.total_minutes,
            project_id: model.project_id.map(Snowflake::new),
            assigned_to: model.assigned_to.map(Snowflake::new),
            created_by: Snowflake::new(model.created_by),
            tag_ids: snowflakes(model.tag_ids),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
