//! Test infrastructure and utilities for the tablero webhook gateway.
//!
//! Provides a ready-made environment (in-process store plus recording
//! tracker), payload and project fixtures, and recording doubles for the
//! hook and store seams. Integration suites across the workspace build on
//! this crate instead of wiring collaborators by hand.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use tablero_core::{
    envelope::EventEnvelope,
    error::{HookError, StoreError},
    models::{Project, ProjectId},
    store::{MemoryProjectStore, ProjectStore},
};
use tablero_hooks::{
    hook::EventHook,
    registry::HookRegistry,
    tracker::{IssueTracker, NewIssue, TrackerError},
    IssueHook, PushHook,
};

pub mod fixtures;

pub use fixtures::{issue_payload, push_payload, ProjectBuilder};

/// Test environment bundling the gateway's collaborators.
///
/// Holds an in-process project store and a recording tracker; `registry()`
/// wires the production hooks against them. Each test creates its own
/// environment, so suites stay isolated without shared state.
#[derive(Debug, Default)]
pub struct TestEnv {
    /// In-process project store; seed it with [`TestEnv::create_project`]
    /// or [`TestEnv::insert_project`].
    pub store: Arc<MemoryProjectStore>,
    /// Records every mutation the hooks request.
    pub tracker: Arc<RecordingTracker>,
}

impl TestEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the production hook registry (push + issue) wired to this
    /// environment's tracker.
    pub fn registry(&self) -> Arc<HookRegistry> {
        let tracker: Arc<dyn IssueTracker> = self.tracker.clone();
        Arc::new(
            HookRegistry::new()
                .register("push", Arc::new(PushHook::new(tracker.clone())))
                .register("issue", Arc::new(IssueHook::new(tracker))),
        )
    }

    /// Inserts a project with a configured gitlab secret and returns its
    /// id.
    pub async fn create_project(&self, id: i64, secret: &str) -> ProjectId {
        let project = ProjectBuilder::new(id).with_gitlab_secret(secret).build();
        let project_id = project.id;
        self.store.insert(project).await;
        project_id
    }

    /// Inserts an arbitrary project record.
    pub async fn insert_project(&self, project: Project) {
        self.store.insert(project).await;
    }
}

/// One mutation requested through the tracker seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerAction {
    /// An issue was asked to move to a new status.
    StatusChanged {
        /// Project the issue belongs to.
        project: ProjectId,
        /// Per-project issue reference number.
        issue_ref: u64,
        /// Requested status slug.
        status: String,
    },
    /// A new issue was asked to be created.
    IssueCreated {
        /// Project the issue belongs to.
        project: ProjectId,
        /// Issue subject line.
        subject: String,
    },
}

/// Tracker double that records requested mutations instead of applying
/// them.
///
/// Accepts every status slug by default; restrict the known set with
/// [`RecordingTracker::restrict_statuses`] to exercise the unknown-status
/// rejection path.
#[derive(Debug, Default)]
pub struct RecordingTracker {
    actions: Mutex<Vec<TrackerAction>>,
    valid_statuses: Mutex<Option<HashSet<String>>>,
}

impl RecordingTracker {
    /// Creates a tracker that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits accepted status slugs; anything else is rejected with
    /// "The status doesn't exist".
    pub fn restrict_statuses(&self, statuses: &[&str]) {
        let set = statuses.iter().map(|s| (*s).to_string()).collect();
        *self.valid_statuses.lock().unwrap() = Some(set);
    }

    /// Snapshot of all recorded actions, in request order.
    pub fn actions(&self) -> Vec<TrackerAction> {
        self.actions.lock().unwrap().clone()
    }

    /// Number of recorded actions.
    pub fn action_count(&self) -> usize {
        self.actions.lock().unwrap().len()
    }
}

#[async_trait]
impl IssueTracker for RecordingTracker {
    async fn set_issue_status(
        &self,
        project: &Project,
        issue_ref: u64,
        status_slug: &str,
    ) -> Result<(), TrackerError> {
        let known = self
            .valid_statuses
            .lock()
            .unwrap()
            .as_ref()
            .is_none_or(|set| set.contains(status_slug));
        if !known {
            return Err(TrackerError::InvalidAction("The status doesn't exist".into()));
        }

        self.actions.lock().unwrap().push(TrackerAction::StatusChanged {
            project: project.id,
            issue_ref,
            status: status_slug.to_string(),
        });
        Ok(())
    }

    async fn create_issue(&self, project: &Project, issue: NewIssue) -> Result<(), TrackerError> {
        self.actions.lock().unwrap().push(TrackerAction::IssueCreated {
            project: project.id,
            subject: issue.subject,
        });
        Ok(())
    }
}

/// Hook double that counts invocations and succeeds.
#[derive(Debug, Default)]
pub struct RecordingHook {
    calls: AtomicUsize,
}

impl RecordingHook {
    /// Creates a hook with a zeroed call counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the hook ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventHook for RecordingHook {
    async fn process_event(
        &self,
        _project: &Project,
        _event: &EventEnvelope,
    ) -> Result<(), HookError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Store double whose every operation fails, for server-fault paths.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl ProjectStore for FailingStore {
    async fn find_project(&self, _id: ProjectId) -> Result<Option<Project>, StoreError> {
        Err(StoreError::Unavailable("injected store failure".into()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("injected store failure".into()))
    }
}
