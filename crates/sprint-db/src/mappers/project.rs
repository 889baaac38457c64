//! Project entity <-> model mapper

use sprint_core::entities::Project;
use sprint_core::error::DomainError;
use sprint_core::value_objects::Snowflake;

use super::{corrupt_column, snowflakes};
use crate::models::ProjectModel;

impl TryFrom<ProjectModel> for Project {
    type Error = DomainError;

    fn try_from(model: ProjectModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse()
            .map_err(|e| corrupt_column("projects", "status", e))?;

        Ok(Project {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            status,
            start_date: model.start_date,
            end_date: model.end_date,
            created_by: Snowflake::new(model.created_by),
            member_ids: snowflakes(model.member_ids),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
