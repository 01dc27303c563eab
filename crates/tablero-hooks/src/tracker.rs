//! Issue tracker collaborator contract.
//!
//! Hooks never touch persistence directly; every project-state mutation
//! goes through [`IssueTracker`]. Deployments wire the tracker's real
//! services layer here, standalone runs use [`LoggingTracker`], and tests
//! use a recording double.

use async_trait::async_trait;
use tablero_core::{error::HookError, models::Project};
use thiserror::Error;
use tracing::info;

/// Failures reported by a tracker implementation.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The requested action is semantically invalid for this project, e.g.
    /// a status slug that does not exist. Becomes a client-facing syntax
    /// error.
    #[error("{0}")]
    InvalidAction(String),

    /// The tracker backend failed; surfaces as a server fault.
    #[error("issue tracker failure: {0}")]
    Backend(String),
}

impl From<TrackerError> for HookError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidAction(message) => Self::ActionSyntax(message),
            TrackerError::Backend(message) => {
                Self::Other(anyhow::anyhow!("issue tracker failure: {message}"))
            },
        }
    }
}

/// A new issue extracted from an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// One-line issue subject. Always non-empty; the hook validates this
    /// before calling the tracker.
    pub subject: String,

    /// Free-form issue description; empty when the event carried none.
    pub description: String,

    /// Link back to the originating item on the hosting service.
    pub external_url: Option<String>,
}

/// Mutating operations hooks may ask the project tracker to perform.
#[async_trait]
pub trait IssueTracker: Send + Sync + std::fmt::Debug {
    /// Moves an issue, addressed by its per-project reference number, to
    /// the named status.
    ///
    /// # Errors
    ///
    /// [`TrackerError::InvalidAction`] when the status slug does not exist
    /// for this project; [`TrackerError::Backend`] on infrastructure
    /// failure.
    async fn set_issue_status(
        &self,
        project: &Project,
        issue_ref: u64,
        status_slug: &str,
    ) -> Result<(), TrackerError>;

    /// Creates a new issue in the project.
    ///
    /// # Errors
    ///
    /// [`TrackerError::Backend`] on infrastructure failure.
    async fn create_issue(&self, project: &Project, issue: NewIssue) -> Result<(), TrackerError>;
}

/// Tracker that records intended mutations to the log and applies nothing.
///
/// Used when the gateway runs standalone, decoupled from a tracker
/// backend.
#[derive(Debug, Default)]
pub struct LoggingTracker;

#[async_trait]
impl IssueTracker for LoggingTracker {
    async fn set_issue_status(
        &self,
        project: &Project,
        issue_ref: u64,
        status_slug: &str,
    ) -> Result<(), TrackerError> {
        info!(project = %project.id, issue_ref, status = status_slug, "status change requested");
        Ok(())
    }

    async fn create_issue(&self, project: &Project, issue: NewIssue) -> Result<(), TrackerError> {
        info!(project = %project.id, subject = %issue.subject, "issue creation requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_action_converts_to_syntax_error() {
        let err = HookError::from(TrackerError::InvalidAction("The status doesn't exist".into()));
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "The status doesn't exist");
    }

    #[test]
    fn backend_failure_converts_to_server_fault() {
        let err = HookError::from(TrackerError::Backend("connection reset".into()));
        assert!(!err.is_client_error());
    }
}
