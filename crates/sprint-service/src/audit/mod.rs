//! Audit interception engine
//!
//! - [`AuditScratch`]: per-invocation state written by the layer and the handler
//! - [`SnapshotRegistry`]: loads the before-state of an entity by type and id
//! - [`Auditor`]: resolves actor and after-state, appends, then notifies
//! - [`NotificationFanout`]: best-effort delivery to every administrator

mod fanout;
mod logging;
#[cfg(any(test, feature = "testing"))]
mod memory;
mod recorder;
mod registry;
mod scratch;

pub use fanout::{FanoutReport, NotificationFanout};
pub use logging::LoggingNotifier;
#[cfg(any(test, feature = "testing"))]
pub use memory::InMemoryAuditLog;
pub use recorder::{AuditContext, AuditOutcome, Auditor, DropReason};
pub use registry::SnapshotRegistry;
pub use scratch::AuditScratch;
