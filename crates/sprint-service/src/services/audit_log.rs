//! Administrator access to the audit trail
//!
//! Listings embed a summary of each acting user. Accounts deleted since the
//! action leave `actor` empty while `actor_id` stays intact.

use std::collections::HashMap;

use futures::future::join_all;
use serde_json::Value as JsonValue;
use sprint_core::entities::{AuditRecord, NewAuditRecord};
use sprint_core::traits::AuditLogQuery;
use sprint_core::{DomainError, Snowflake};
use tracing::{instrument, warn};

use crate::dto::{
    page_window, ActorSummary, AuditLogListQuery, AuditLogResponse, CreateAuditLogRequest,
    PagedResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AuditLogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditLogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Matching records newest first
    #[instrument(skip(self))]
    pub async fn list_logs(
        &self,
        query: AuditLogListQuery,
    ) -> ServiceResult<PagedResponse<AuditLogResponse>> {
        let window = page_window(query.page, query.limit);
        let (records, total) = self
            .ctx
            .audit_log_repo()
            .list(&AuditLogQuery {
                actor_id: query.actor_id,
                entity_type: query.entity_type,
                entity_id: query.entity_id,
                action: query.action,
                page: window,
            })
            .await?;

        let data = self.with_actors(records).await;
        Ok(PagedResponse::new(data, window, total))
    }

    #[instrument(skip(self))]
    pub async fn get_log(&self, id: Snowflake) -> ServiceResult<AuditLogResponse> {
        let record = self
            .ctx
            .audit_log_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AuditLogNotFound(id))?;
        Ok(self.with_actor(record).await)
    }

    /// Append a record on behalf of `actor_id`; admins are notified as usual
    #[instrument(skip(self, request))]
    pub async fn create_log(
        &self,
        actor_id: Snowflake,
        request: CreateAuditLogRequest,
    ) -> ServiceResult<AuditLogResponse> {
        let record = NewAuditRecord {
            entity_id: request.entity_id,
            before: request.before,
            after: request.after,
            metadata: request
                .metadata
                .unwrap_or_else(|| JsonValue::Object(serde_json::Map::new())),
            ..NewAuditRecord::new(actor_id, request.action, request.entity_type)
        };
        let stored = self.ctx.auditor().append(record).await?;
        Ok(self.with_actor(stored).await)
    }

    async fn with_actor(&self, record: AuditRecord) -> AuditLogResponse {
        let actor = self.find_actor(record.actor_id).await;
        AuditLogResponse {
            actor,
            ..AuditLogResponse::from(record)
        }
    }

    async fn find_actor(&self, id: Snowflake) -> Option<ActorSummary> {
        match self.ctx.user_repo().find_by_id(id).await {
            Ok(user) => user.as_ref().map(ActorSummary::from),
            Err(e) => {
                warn!(actor_id = %id, error = %e, "Failed to load audit actor");
                None
            }
        }
    }

    /// Resolve each distinct actor once; lookup failures leave `actor` empty
    async fn with_actors(&self, records: Vec<AuditRecord>) -> Vec<AuditLogResponse> {
        let mut ids: Vec<Snowflake> = records.iter().map(|r| r.actor_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let lookups = ids.iter().map(|id| self.find_actor(*id));
        let actors: HashMap<Snowflake, ActorSummary> = ids
            .iter()
            .zip(join_all(lookups).await)
            .filter_map(|(id, actor)| actor.map(|actor| (*id, actor)))
            .collect();

        records
            .into_iter()
            .map(|record| {
                let actor = actors.get(&record.actor_id).cloned();
                AuditLogResponse {
                    actor,
                    ..AuditLogResponse::from(record)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Fixture;
    use sprint_core::entities::NewAuditRecord;
    use sprint_core::traits::AuditLogRepository;
    use sprint_core::{AuditAction, EntityType};

    #[tokio::test]
    async fn test_filters_and_lookup() {
        let fx = Fixture::new();
        let mut update = NewAuditRecord::new(Snowflake::new(1), AuditAction::Update, EntityType::Task);
        update.entity_id = Some(Snowflake::new(50));
        let stored = fx.audit_log.append(update).await.unwrap();
        fx.audit_log
            .append(NewAuditRecord::new(Snowflake::new(2), AuditAction::Login, EntityType::User))
            .await
            .unwrap();

        let service = AuditLogService::new(&fx.ctx);
        let tasks = service
            .list_logs(AuditLogListQuery {
                entity_type: Some(EntityType::Task),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(tasks.total, 1);
        assert_eq!(tasks.data[0].entity_id, Some(Snowflake::new(50)));

        let everything = service.list_logs(AuditLogListQuery::default()).await.unwrap();
        assert_eq!(everything.total, 2);
        assert_eq!(everything.limit, 20);
        assert_eq!(everything.data[0].action, AuditAction::Login);

        assert_eq!(service.get_log(stored.id).await.unwrap().id, stored.id);
        let err = service.get_log(Snowflake::new(1)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_actor_is_embedded_when_the_account_exists() {
        let fx = Fixture::new();
        let admin = fx.user("admin@example.com", true).await;
        fx.audit_log
            .append(NewAuditRecord::new(admin.id, AuditAction::Login, EntityType::User))
            .await
            .unwrap();
        fx.audit_log
            .append(NewAuditRecord::new(Snowflake::new(404), AuditAction::Login, EntityType::User))
            .await
            .unwrap();

        let page = AuditLogService::new(&fx.ctx)
            .list_logs(AuditLogListQuery::default())
            .await
            .unwrap();
        let known = page.data.iter().find(|r| r.actor_id == admin.id).unwrap();
        let actor = known.actor.as_ref().unwrap();
        assert_eq!(actor.email, "admin@example.com");
        assert_eq!(actor.first_name, "Test");

        let orphan = page.data.iter().find(|r| r.actor_id == Snowflake::new(404)).unwrap();
        assert!(orphan.actor.is_none());
    }

    #[tokio::test]
    async fn test_manual_create() {
        let fx = Fixture::new();
        let admin = fx.user("admin@example.com", true).await;

        let created = AuditLogService::new(&fx.ctx)
            .create_log(
                admin.id,
                CreateAuditLogRequest {
                    action: AuditAction::Update,
                    entity_type: EntityType::Project,
                    entity_id: Some(Snowflake::new(77)),
                    before: None,
                    after: Some(serde_json::json!({"name": "renamed"})),
                    metadata: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.actor_id, admin.id);
        assert_eq!(created.actor.unwrap().email, "admin@example.com");
        assert_eq!(created.metadata, serde_json::json!({}));
        let stored = fx.audit_log.records();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].entity_id, Some(Snowflake::new(77)));
    }
}
