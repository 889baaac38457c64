//! Notification ports used by the audit fan-out

use async_trait::async_trait;
use std::fmt;

use crate::entities::{AuditRecord, User};

use super::RepoResult;

/// Kind of event a notification announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// A new audit entry was recorded
    Audit,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audit => "audit",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the users that receive audit notifications
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Current set of administrators
    async fn administrators(&self) -> RepoResult<Vec<User>>;
}

/// Delivers one notification to one recipient
#[async_trait]
pub trait AuditNotifier: Send + Sync {
    async fn deliver(
        &self,
        kind: NotificationKind,
        record: &AuditRecord,
        recipient: &User,
    ) -> RepoResult<()>;
}
