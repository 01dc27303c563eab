//! Hook for `issue` events: mirror newly opened issues into the tracker.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tablero_core::{envelope::EventEnvelope, error::HookError, models::Project};
use tracing::debug;

use crate::{
    hook::EventHook,
    tracker::{IssueTracker, NewIssue},
};

/// Creates a tracker issue when the hosting service reports one opened.
///
/// Actions other than `open` (update, close, reopen) are acknowledged
/// without effect; the tracker owns the issue from the moment it is
/// mirrored.
#[derive(Debug)]
pub struct IssueHook {
    tracker: Arc<dyn IssueTracker>,
}

impl IssueHook {
    /// Creates an issue hook that mirrors issues through the given tracker.
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl EventHook for IssueHook {
    async fn process_event(
        &self,
        project: &Project,
        event: &EventEnvelope,
    ) -> Result<(), HookError> {
        let Some(attributes) = event.get("object_attributes").and_then(Value::as_object) else {
            debug!(project = %project.id, "issue event without object attributes");
            return Ok(());
        };

        let action = attributes.get("action").and_then(Value::as_str).unwrap_or("");
        if action != "open" {
            debug!(project = %project.id, action, "ignoring issue event action");
            return Ok(());
        }

        let subject = attributes
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or_else(|| HookError::ActionSyntax("Invalid issue information".into()))?;

        let description =
            attributes.get("description").and_then(Value::as_str).unwrap_or_default();
        let external_url = attributes.get("url").and_then(Value::as_str).map(str::to_owned);

        self.tracker
            .create_issue(project, NewIssue {
                subject: subject.to_owned(),
                description: description.to_owned(),
                external_url,
            })
            .await?;

        Ok(())
    }
}
