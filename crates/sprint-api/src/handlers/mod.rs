//! Route handlers
//!
//! All HTTP request handlers organized by domain. Mutating handlers report
//! what they produced through [`crate::audit::AuditScope`].

pub mod audit_logs;
pub mod auth;
pub mod comments;
pub mod health;
pub mod projects;
pub mod stats;
pub mod tags;
pub mod tasks;
pub mod time_entries;
pub mod users;
