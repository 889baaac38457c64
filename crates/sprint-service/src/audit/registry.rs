//! Before-state loading through a registry of typed snapshot sources
//!
//! Each audited entity type is registered once at startup with the
//! repository that can read it. Loading is a single `find_by_id` and is not
//! synchronized with the handler's write that follows it.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sprint_core::error::DomainError;
use sprint_core::traits::{EntityRepository, RepoResult};
use sprint_core::value_objects::{EntityType, Snowflake};

/// Reads one entity as an opaque JSON snapshot
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn snapshot(&self, id: Snowflake) -> RepoResult<Option<JsonValue>>;
}

/// Adapts any `EntityRepository<E>` into a [`SnapshotSource`]
pub struct RepositorySnapshots<E, R: ?Sized> {
    repo: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R: ?Sized> RepositorySnapshots<E, R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, R> SnapshotSource for RepositorySnapshots<E, R>
where
    E: Serialize + Send + 'static,
    R: EntityRepository<E> + ?Sized + 'static,
{
    async fn snapshot(&self, id: Snowflake) -> RepoResult<Option<JsonValue>> {
        match self.repo.find_by_id(id).await? {
            Some(entity) => serde_json::to_value(&entity)
                .map(Some)
                .map_err(|e| DomainError::InternalError(e.to_string())),
            None => Ok(None),
        }
    }
}

#[derive(Clone, Default)]
pub struct SnapshotRegistry {
    sources: HashMap<EntityType, Arc<dyn SnapshotSource>>,
}

impl SnapshotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the repository that serves `entity_type`
    #[must_use]
    pub fn register<E, R>(mut self, entity_type: EntityType, repo: Arc<R>) -> Self
    where
        E: Serialize + Send + 'static,
        R: EntityRepository<E> + ?Sized + 'static,
    {
        self.sources
            .insert(entity_type, Arc::new(RepositorySnapshots::<E, R>::new(repo)));
        self
    }

    /// Current state of `(entity_type, id)`; `None` for unknown types or ids
    pub async fn load(&self, entity_type: EntityType, id: Snowflake) -> RepoResult<Option<JsonValue>> {
        match self.sources.get(&entity_type) {
            Some(source) => source.snapshot(id).await,
            None => Ok(None),
        }
    }
}

impl fmt::Debug for SnapshotRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotRegistry")
            .field("entity_types", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}
