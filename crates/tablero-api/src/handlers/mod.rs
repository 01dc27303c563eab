//! HTTP request handlers for the tablero API.
//!
//! Handlers follow a consistent pattern: gate-by-gate input validation,
//! tracing for observability, and standardized error responses with stable
//! kinds and human-readable messages.
//!
//! # Handler Organization
//!
//! - `gitlab` - the inbound webhook endpoint
//! - `health` - health check and readiness probes

pub mod gitlab;
pub mod health;

// Re-export handlers for convenient access
pub use gitlab::gitlab_webhook;
pub use health::{health_check, liveness_check, readiness_check};
