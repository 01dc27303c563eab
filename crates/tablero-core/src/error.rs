//! Error types and result handling for webhook processing.
//!
//! Defines the failure taxonomy of the inbound-event pipeline. Client-facing
//! variants carry the exact messages the sender integration expects and map
//! to bad-request responses; infrastructure variants are server faults and
//! are deliberately never converted into client errors.

use thiserror::Error;

use crate::envelope::DecodeError;

/// Result type alias using [`HookError`].
pub type Result<T> = std::result::Result<T, HookError>;

/// Infrastructure failure from the project store.
///
/// The store is an external collaborator reached through the
/// [`ProjectStore`](crate::store::ProjectStore) trait; anything it reports
/// beyond "project absent" is an availability problem, not a client error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store backend could not be reached or answered abnormally.
    #[error("project store unavailable: {0}")]
    Unavailable(String),
}

/// Failures surfaced by the webhook pipeline.
#[derive(Debug, Error)]
pub enum HookError {
    /// The request-supplied project identifier matched no project.
    #[error("The project doesn't exist")]
    ProjectNotFound,

    /// The request body was not a UTF-8 encoded JSON object.
    #[error("The payload is not a valid json")]
    MalformedPayload(#[from] DecodeError),

    /// Shared-secret authentication failed.
    #[error("Bad signature")]
    BadSignature,

    /// A hook rejected a structurally valid payload as semantically invalid.
    ///
    /// The message is authored by the hook and is shown to the caller
    /// verbatim, e.g. "The status doesn't exist".
    #[error("{0}")]
    ActionSyntax(String),

    /// Project store infrastructure failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Unexpected failure inside a hook or one of its collaborators.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HookError {
    /// Returns a stable machine-readable kind for response bodies and logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ProjectNotFound => "project_not_found",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::BadSignature => "bad_signature",
            Self::ActionSyntax(_) => "action_syntax",
            Self::Store(_) => "store_unavailable",
            Self::Other(_) => "internal",
        }
    }

    /// Returns whether this failure is the caller's fault.
    ///
    /// Client errors become bad-request responses; everything else surfaces
    /// as a server fault so bugs in hooks are never masked.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound
                | Self::MalformedPayload(_)
                | Self::BadSignature
                | Self::ActionSyntax(_)
        )
    }
}
