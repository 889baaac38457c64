//! # sprint-api
//!
//! REST API server built with Axum. Every mutating route is wrapped in an
//! [`audit::AuditLayer`] that records who changed what once the response
//! has been delivered.

pub mod audit;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod testing;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
