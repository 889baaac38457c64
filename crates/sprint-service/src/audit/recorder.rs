//! Audit resolution and persistence
//!
//! [`Auditor`] owns the process-wide audit collaborators. The interception
//! layer calls [`Auditor::capture_before`] ahead of the handler and
//! [`Auditor::spawn`] once the response has been fully delivered.

use serde_json::{json, Value as JsonValue};
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use sprint_core::entities::{AuditRecord, NewAuditRecord};
use sprint_core::traits::{AuditLogRepository, RepoResult};
use sprint_core::value_objects::{AuditAction, EntityType, Snowflake};

use super::fanout::{FanoutReport, NotificationFanout};
use super::registry::SnapshotRegistry;
use super::scratch::AuditScratch;

/// What the interception layer knows about one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    pub entity_type: EntityType,
    pub action: AuditAction,
    /// Target id taken from the request path, when there is one
    pub target_id: Option<Snowflake>,
    /// Identity established by authentication, if any
    pub authenticated: Option<Snowflake>,
    pub route: String,
    pub method: String,
    pub request_id: Option<String>,
}

impl AuditContext {
    pub fn new(entity_type: EntityType, action: AuditAction) -> Self {
        Self {
            entity_type,
            action,
            target_id: None,
            authenticated: None,
            route: String::new(),
            method: String::new(),
            request_id: None,
        }
    }

    fn metadata(&self) -> JsonValue {
        let mut metadata = json!({
            "route": self.route,
            "method": self.method,
        });
        if let (Some(id), Some(map)) = (&self.request_id, metadata.as_object_mut()) {
            map.insert("request_id".to_string(), JsonValue::String(id.clone()));
        }
        metadata
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Neither an authenticated identity nor an override was present
    NoActor,
    /// The store rejected the record
    StoreFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuditOutcome {
    Recorded {
        record: AuditRecord,
        report: FanoutReport,
    },
    Dropped(DropReason),
}

impl AuditOutcome {
    pub fn record(&self) -> Option<&AuditRecord> {
        match self {
            Self::Recorded { record, .. } => Some(record),
            Self::Dropped(_) => None,
        }
    }
}

pub struct Auditor {
    registry: SnapshotRegistry,
    store: Arc<dyn AuditLogRepository>,
    fanout: NotificationFanout,
}

impl Auditor {
    pub fn new(
        registry: SnapshotRegistry,
        store: Arc<dyn AuditLogRepository>,
        fanout: NotificationFanout,
    ) -> Self {
        Self {
            registry,
            store,
            fanout,
        }
    }

    pub fn store(&self) -> &dyn AuditLogRepository {
        self.store.as_ref()
    }

    /// Load the pre-invocation snapshot for UPDATE and DELETE actions.
    ///
    /// Load failures are logged and leave the snapshot absent.
    pub async fn capture_before(
        &self,
        entity_type: EntityType,
        action: AuditAction,
        target_id: Option<Snowflake>,
    ) -> Option<JsonValue> {
        if !action.captures_before() {
            return None;
        }
        let id = target_id?;

        match self.registry.load(entity_type, id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(%entity_type, entity_id = %id, error = %e, "Failed to load before-state");
                None
            }
        }
    }

    /// Assemble the record for an invocation, or `None` when no actor resolves
    pub fn build_record(ctx: &AuditContext, scratch: &AuditScratch) -> Option<NewAuditRecord> {
        let actor_id = scratch.resolve_actor(ctx.authenticated)?;
        let after = scratch.resolve_after().cloned();

        let entity_id = match ctx.action {
            AuditAction::Create => after.as_ref().and_then(snapshot_id).or(ctx.target_id),
            _ => ctx.target_id,
        };

        Some(NewAuditRecord {
            actor_id,
            action: ctx.action,
            entity_type: ctx.entity_type,
            entity_id,
            before: scratch.before().cloned(),
            after,
            metadata: ctx.metadata(),
        })
    }

    /// Resolve, persist and fan out one audit event. Never fails outward.
    #[instrument(
        skip_all,
        fields(entity_type = %ctx.entity_type, action = %ctx.action, route = %ctx.route)
    )]
    pub async fn finalize(&self, ctx: AuditContext, scratch: AuditScratch) -> AuditOutcome {
        let Some(record) = Self::build_record(&ctx, &scratch) else {
            debug!("No actor resolved; audit event dropped");
            return AuditOutcome::Dropped(DropReason::NoActor);
        };

        let stored = match self.store.append(record).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, "Failed to persist audit record");
                return AuditOutcome::Dropped(DropReason::StoreFailed);
            }
        };

        info!(audit_id = %stored.id, actor_id = %stored.actor_id, "Audit record stored");

        let report = self.fanout.notify(&stored).await;
        AuditOutcome::Recorded {
            record: stored,
            report,
        }
    }

    /// Store a record submitted directly by an administrator, then notify.
    ///
    /// Unlike [`Auditor::finalize`], a store failure is returned to the caller.
    #[instrument(skip_all, fields(entity_type = %record.entity_type, action = %record.action))]
    pub async fn append(&self, record: NewAuditRecord) -> RepoResult<AuditRecord> {
        let stored = self.store.append(record).await?;
        info!(audit_id = %stored.id, actor_id = %stored.actor_id, "Manual audit record stored");
        self.fanout.notify(&stored).await;
        Ok(stored)
    }

    /// Run [`Auditor::finalize`] as a detached task on the current runtime
    pub fn spawn(
        self: Arc<Self>,
        ctx: AuditContext,
        scratch: AuditScratch,
    ) -> Option<JoinHandle<AuditOutcome>> {
        match Handle::try_current() {
            Ok(handle) => Some(handle.spawn(async move { self.finalize(ctx, scratch).await })),
            Err(_) => {
                error!(
                    entity_type = %ctx.entity_type,
                    action = %ctx.action,
                    "No async runtime available; audit event dropped"
                );
                None
            }
        }
    }
}

impl fmt::Debug for Auditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auditor")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

fn snapshot_id(snapshot: &JsonValue) -> Option<Snowflake> {
    snapshot
        .get("id")
        .and_then(|id| serde_json::from_value(id.clone()).ok())
}
