//! The hook capability contract.

use async_trait::async_trait;
use tablero_core::{envelope::EventEnvelope, error::HookError, models::Project};

/// A unit of business logic invoked for one event kind.
///
/// Implementations receive the resolved project and the decoded envelope
/// and apply whatever effect the event calls for. A hook distinguishes two
/// failure classes: a payload that is valid JSON but semantically unusable
/// for this kind is reported as [`HookError::ActionSyntax`] (a client
/// error), while anything else propagates unwrapped as a server fault.
///
/// # Design Philosophy
///
/// Hooks form a closed set selected by event-kind string at dispatch time.
/// They are registered explicitly into a [`HookRegistry`](crate::registry::HookRegistry)
/// during startup, so tests can swap registries freely and no module-global
/// state exists.
#[async_trait]
pub trait EventHook: Send + Sync + std::fmt::Debug {
    /// Processes one decoded event for the given project.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ActionSyntax`] for semantically invalid
    /// payloads; other variants for infrastructure failures.
    async fn process_event(&self, project: &Project, event: &EventEnvelope)
        -> Result<(), HookError>;
}
