//! Hook for `push` events: commit message directives.
//!
//! Commit messages may carry directives of the form `TG-<ref> #<status>`
//! (case-insensitive), asking the tracker to move the referenced issue to
//! a new status. A push with no directives is a successful no-op.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use tablero_core::{envelope::EventEnvelope, error::HookError, models::Project};
use tracing::debug;

use crate::{hook::EventHook, tracker::IssueTracker};

static STATUS_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tg-(\d+)\s+#([-\w]+)").expect("directive pattern compiles"));

/// Processes push notifications by scanning commit messages for issue
/// status directives.
#[derive(Debug)]
pub struct PushHook {
    tracker: Arc<dyn IssueTracker>,
}

impl PushHook {
    /// Creates a push hook that applies directives through the given
    /// tracker.
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl EventHook for PushHook {
    async fn process_event(
        &self,
        project: &Project,
        event: &EventEnvelope,
    ) -> Result<(), HookError> {
        let commits = event.get("commits").and_then(Value::as_array);

        for commit in commits.into_iter().flatten() {
            // Commits without a message carry nothing actionable.
            let Some(message) = commit.get("message").and_then(Value::as_str) else {
                continue;
            };

            for capture in STATUS_DIRECTIVE.captures_iter(message) {
                let Ok(issue_ref) = capture[1].parse::<u64>() else {
                    continue;
                };
                let status_slug = &capture[2];

                debug!(
                    project = %project.id,
                    issue_ref,
                    status = status_slug,
                    "applying commit directive"
                );
                self.tracker.set_issue_status(project, issue_ref, status_slug).await?;
            }
        }

        Ok(())
    }
}
