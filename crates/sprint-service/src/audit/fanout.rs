//! Best-effort delivery of audit notifications to administrators

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, warn};

use sprint_core::entities::AuditRecord;
use sprint_core::traits::{AdminDirectory, AuditNotifier, NotificationKind};

/// Outcome of one fan-out round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutReport {
    pub recipients: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Sends one notification per administrator, independently and at most once
#[derive(Clone)]
pub struct NotificationFanout {
    directory: Arc<dyn AdminDirectory>,
    notifier: Arc<dyn AuditNotifier>,
}

impl NotificationFanout {
    pub fn new(directory: Arc<dyn AdminDirectory>, notifier: Arc<dyn AuditNotifier>) -> Self {
        Self {
            directory,
            notifier,
        }
    }

    /// Notify every current administrator about `record`.
    ///
    /// Failures are logged per recipient and never affect other recipients.
    pub async fn notify(&self, record: &AuditRecord) -> FanoutReport {
        let admins = match self.directory.administrators().await {
            Ok(admins) => admins,
            Err(e) => {
                error!(audit_id = %record.id, error = %e, "Failed to resolve audit recipients");
                return FanoutReport::default();
            }
        };

        let deliveries = admins.iter().map(|admin| async move {
            let result = self
                .notifier
                .deliver(NotificationKind::Audit, record, admin)
                .await;
            if let Err(e) = &result {
                warn!(
                    audit_id = %record.id,
                    recipient_id = %admin.id,
                    error = %e,
                    "Audit notification failed"
                );
            }
            result.is_ok()
        });

        let results = join_all(deliveries).await;
        let delivered = results.iter().filter(|ok| **ok).count();
        let report = FanoutReport {
            recipients: results.len(),
            delivered,
            failed: results.len() - delivered,
        };

        debug!(audit_id = %record.id, ?report, "Audit notifications sent");
        report
    }
}
