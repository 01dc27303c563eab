//! Event hooks for the tablero webhook gateway.
//!
//! Defines the hook capability contract, the immutable registry that maps
//! event kinds to hooks, and the built-in GitLab hooks (push and issue).
//! Hooks mutate project state exclusively through the
//! [`IssueTracker`](tracker::IssueTracker) collaborator, keeping dispatch
//! logic free of persistence concerns.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod hook;
pub mod issues;
pub mod push;
pub mod registry;
pub mod tracker;

pub use hook::EventHook;
pub use issues::IssueHook;
pub use push::PushHook;
pub use registry::{DispatchOutcome, HookRegistry};
pub use tracker::{IssueTracker, LoggingTracker, NewIssue, TrackerError};
