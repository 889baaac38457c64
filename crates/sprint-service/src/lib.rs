//! # sprint-service
//!
//! Application layer containing business logic, services, DTOs and the
//! audit engine that records every mutating call.

pub mod audit;
pub mod dto;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod services;

pub use audit::{AuditContext, AuditOutcome, AuditScratch, Auditor, SnapshotRegistry};
pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
