//! Core domain types for the tablero webhook gateway.
//!
//! Provides the project model, the decoded event envelope, the error
//! taxonomy for the inbound-event pipeline, and the project store contract.
//! The HTTP surface and the hook implementations both build on these
//! foundational types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
pub mod error;
pub mod models;
pub mod store;

pub use envelope::{DecodeError, EventEnvelope, DEFAULT_EVENT_KIND, EVENT_KIND_KEY};
pub use error::{HookError, Result, StoreError};
pub use models::{ModulesConfig, Project, ProjectId};
pub use store::{MemoryProjectStore, ProjectStore};
