//! Audit record entity <-> model mapper

use sprint_core::entities::AuditRecord;
use sprint_core::error::DomainError;
use sprint_core::value_objects::Snowflake;

use super::corrupt_column;
use crate::models::AuditLogModel;

impl TryFrom<AuditLogModel> for AuditRecord {
    type Error = DomainError;

    fn try_from(model: AuditLogModel) -> Result<Self, Self::Error> {
        let action = model
            .action
            .parse()
            .map_err(|e| corrupt_column("audit_logs", "action", e))?;
        let entity_type = model
            .entity_type
            .parse()
            .map_err(|e| corrupt_column("audit_logs", "entity_type", e))?;

        Ok(AuditRecord {
            id: Snowflake::new(model.id),
            actor_id: Snowflake::new(model.actor_id),
            action,
            entity_type,
            entity_id: model.entity_id.map(Snowflake::new),
            before: model.before,
            after: model.after,
            metadata: model.metadata,
            created_at: model.created_at,
        })
    }
}
