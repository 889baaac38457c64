//! Integration test utilities for the task tracker
//!
//! Spins up the real application against PostgreSQL and drives it over
//! HTTP, reading the audit trail back through the database.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
