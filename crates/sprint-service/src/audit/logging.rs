//! Notifier that only writes to the log

use async_trait::async_trait;
use tracing::info;

use sprint_core::entities::{AuditRecord, User};
use sprint_core::traits::{AuditNotifier, NotificationKind, RepoResult};

/// Used when no pub/sub backend is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl AuditNotifier for LoggingNotifier {
    async fn deliver(
        &self,
        kind: NotificationKind,
        record: &AuditRecord,
        recipient: &User,
    ) -> RepoResult<()> {
        info!(
            kind = %kind,
            recipient_id = %recipient.id,
            recipient_email = %recipient.email,
            audit_id = %record.id,
            action = %record.action,
            entity_type = %record.entity_type,
            "Audit notification"
        );
        Ok(())
    }
}
