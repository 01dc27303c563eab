//! Event kind to hook dispatch table.

use std::{collections::HashMap, sync::Arc};

use tablero_core::{envelope::EventEnvelope, error::HookError, models::Project};
use tracing::debug;

use crate::hook::EventHook;

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered hook ran to completion.
    Processed,

    /// No hook is registered for the event kind; the event was acknowledged
    /// without effect.
    Ignored,
}

/// Immutable mapping from event kind to hook.
///
/// Built once during startup and shared behind an `Arc` across all
/// in-flight requests; there is no way to mutate it afterwards, which makes
/// it safe for unlimited concurrent readers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use tablero_hooks::{HookRegistry, LoggingTracker, PushHook};
///
/// let tracker = Arc::new(LoggingTracker);
/// let registry = HookRegistry::new().register("push", Arc::new(PushHook::new(tracker)));
/// assert!(registry.get("push").is_some());
/// ```
#[derive(Debug, Default)]
pub struct HookRegistry {
    hooks: HashMap<String, Arc<dyn EventHook>>,
}

impl HookRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hook for an event kind, consuming and returning the registry
    /// so construction chains.
    ///
    /// Registering the same kind twice replaces the earlier hook.
    #[must_use]
    pub fn register(mut self, kind: impl Into<String>, hook: Arc<dyn EventHook>) -> Self {
        self.hooks.insert(kind.into(), hook);
        self
    }

    /// Looks up the hook for an event kind.
    pub fn get(&self, kind: &str) -> Option<&Arc<dyn EventHook>> {
        self.hooks.get(kind)
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Routes one event to its hook.
    ///
    /// An event kind with no registered hook is a successful no-op, not an
    /// error: senders deliver every event type they know about and must not
    /// see failures for the ones this deployment ignores.
    ///
    /// # Errors
    ///
    /// Propagates whatever the hook returns, unwrapped.
    pub async fn dispatch(
        &self,
        project: &Project,
        event: &EventEnvelope,
    ) -> Result<DispatchOutcome, HookError> {
        let Some(hook) = self.hooks.get(event.kind()) else {
            debug!(kind = event.kind(), project = %project.id, "no hook registered for event kind");
            return Ok(DispatchOutcome::Ignored);
        };

        hook.process_event(project, event).await?;
        Ok(DispatchOutcome::Processed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use tablero_core::models::ProjectId;

    use super::*;

    #[derive(Debug, Default)]
    struct CountingHook {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EventHook for CountingHook {
        async fn process_event(
            &self,
            _project: &Project,
            _event: &EventEnvelope,
        ) -> Result<(), HookError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct RejectingHook;

    #[async_trait]
    impl EventHook for RejectingHook {
        async fn process_event(
            &self,
            _project: &Project,
            _event: &EventEnvelope,
        ) -> Result<(), HookError> {
            Err(HookError::ActionSyntax("Invalid issue information".into()))
        }
    }

    fn project() -> Project {
        Project {
            id: ProjectId(1),
            name: "demo".into(),
            slug: "demo".into(),
            created_at: Utc::now(),
            modules_config: None,
        }
    }

    fn envelope(kind: &str) -> EventEnvelope {
        let raw = format!(r#"{{"object_kind": "{kind}"}}"#);
        EventEnvelope::decode(raw.as_bytes()).unwrap()
    }

    #[tokio::test]
    async fn dispatch_invokes_registered_hook_once() {
        let hook = Arc::new(CountingHook::default());
        let registry = HookRegistry::new().register("push", hook.clone());

        let outcome = registry.dispatch(&project(), &envelope("push")).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Processed);
        assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dispatch_ignores_unregistered_kind() {
        let hook = Arc::new(CountingHook::default());
        let registry = HookRegistry::new().register("push", hook.clone());

        let outcome = registry.dispatch(&project(), &envelope("merge_request")).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert_eq!(hook.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dispatch_on_empty_registry_is_a_no_op() {
        let registry = HookRegistry::new();
        assert!(registry.is_empty());

        let outcome = registry.dispatch(&project(), &envelope("push")).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Ignored);
    }

    #[tokio::test]
    async fn dispatch_propagates_hook_errors() {
        let registry = HookRegistry::new().register("issue", Arc::new(RejectingHook));

        let err = registry.dispatch(&project(), &envelope("issue")).await.unwrap_err();

        assert!(matches!(err, HookError::ActionSyntax(_)));
        assert_eq!(err.to_string(), "Invalid issue information");
    }

    #[tokio::test]
    async fn register_replaces_hook_for_same_kind() {
        let first = Arc::new(CountingHook::default());
        let second = Arc::new(CountingHook::default());
        let registry = HookRegistry::new()
            .register("push", first.clone())
            .register("push", second.clone());

        assert_eq!(registry.len(), 1);
        registry.dispatch(&project(), &envelope("push")).await.unwrap();

        assert_eq!(first.calls.load(Ordering::SeqCst), 0);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }
}
