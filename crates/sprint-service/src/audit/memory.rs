//! In-process audit store
//!
//! Keeps records in memory with the same ordering and filtering rules as the
//! PostgreSQL store. Used by tests and by tooling that runs without a database.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use sprint_core::entities::{AuditRecord, NewAuditRecord};
use sprint_core::traits::{AuditLogQuery, AuditLogRepository, RepoResult};
use sprint_core::value_objects::{Snowflake, SnowflakeGenerator};

#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    ids: SnowflakeGenerator,
    records: RwLock<Vec<AuditRecord>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// All records in insertion order
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLog {
    async fn append(&self, record: NewAuditRecord) -> RepoResult<AuditRecord> {
        let stored = record.into_record(self.ids.generate(), Utc::now());
        self.records.write().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AuditRecord>> {
        Ok(self.records.read().iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, query: &AuditLogQuery) -> RepoResult<(Vec<AuditRecord>, i64)> {
        let records = self.records.read();
        let mut matching: Vec<_> = records.iter().filter(|r| query.matches(r)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(query.page.offset.max(0) as usize)
            .take(query.page.limit.max(0) as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprint_core::traits::Page;
    use sprint_core::value_objects::{AuditAction, EntityType};

    #[tokio::test]
    async fn test_list_is_newest_first_and_paged() {
        let store = InMemoryAuditLog::new();
        for action in [AuditAction::Create, AuditAction::Update, AuditAction::Delete] {
            store
                .append(NewAuditRecord::new(Snowflake::new(1), action, EntityType::Task))
                .await
                .unwrap();
        }

        let (page, total) = store
            .list(&AuditLogQuery {
                page: Page::numbered(1, 2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].action, AuditAction::Delete);
        assert_eq!(page[1].action, AuditAction::Update);

        let (second, _) = store
            .list(&AuditLogQuery {
                page: Page::numbered(2, 2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].action, AuditAction::Create);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = InMemoryAuditLog::new();
        let stored = store
            .append(NewAuditRecord::new(Snowflake::new(1), AuditAction::Login, EntityType::User))
            .await
            .unwrap();
        assert_eq!(store.find_by_id(stored.id).await.unwrap(), Some(stored));
        assert!(store.find_by_id(Snowflake::new(5)).await.unwrap().is_none());
    }
}
