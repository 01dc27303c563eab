//! GitLab webhook endpoint.
//!
//! Single inbound-event pipeline with one gate per stage, each gate
//! short-circuiting the request: resolve project, decode payload, validate
//! the shared secret, dispatch to the hook registry. The signature is
//! always checked after a successful decode and strictly before any hook
//! runs.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tablero_core::{
    envelope::EventEnvelope,
    error::HookError,
    models::{Project, ProjectId},
    store::ProjectStore,
};
use tablero_hooks::registry::DispatchOutcome;
use tracing::{debug, error, info, instrument, warn};

use crate::{server::AppState, signature};

/// Query parameters of the webhook route.
///
/// Both are optional at the type level; absence is handled by the pipeline
/// gates rather than by extractor rejection.
#[derive(Debug, Deserialize)]
pub struct HookParams {
    /// Target project identifier.
    pub project: Option<String>,
    /// Shared-secret token.
    pub key: Option<String>,
}

/// Error response with kind and message.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error details including kind and message.
    error: ErrorDetail,
}

/// Detailed error information.
#[derive(Debug, Serialize)]
struct ErrorDetail {
    /// Stable machine-readable error kind.
    code: &'static str,
    /// Human-readable error description.
    message: String,
}

/// Receives one event notification from the hosting service.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 400: unknown project, undecodable payload, bad signature, or a
///   hook-reported syntax error
/// - 500: project store or hook infrastructure failure
#[instrument(
    name = "gitlab_webhook",
    skip(state, params, body),
    fields(
        project = params.project.as_deref().unwrap_or("missing"),
        payload_size = body.len(),
    )
)]
pub async fn gitlab_webhook(
    State(state): State<AppState>,
    Query(params): Query<HookParams>,
    body: Bytes,
) -> Response {
    let project = match resolve_project(state.store.as_ref(), params.project.as_deref()).await {
        Ok(project) => project,
        Err(err) => return error_response(&err),
    };

    let event = match EventEnvelope::decode(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!(project = %project.id, error = %err, "rejecting undecodable payload");
            return error_response(&HookError::from(err));
        },
    };

    let verdict = signature::validate_shared_secret(&project, params.key.as_deref());
    if !verdict.is_valid {
        warn!(
            project = %project.id,
            reason = verdict.error_message.as_deref().unwrap_or(""),
            "rejecting unauthenticated webhook"
        );
        return error_response(&HookError::BadSignature);
    }

    match state.hooks.dispatch(&project, &event).await {
        Ok(DispatchOutcome::Processed) => {
            info!(project = %project.id, kind = event.kind(), "webhook processed");
            empty_ok()
        },
        Ok(DispatchOutcome::Ignored) => {
            debug!(project = %project.id, kind = event.kind(), "webhook acknowledged without hook");
            empty_ok()
        },
        Err(err) => error_response(&err),
    }
}

/// Resolves the target project from the request-supplied identifier.
///
/// Missing and unparsable identifiers resolve to "not found"; only store
/// infrastructure failures are distinguished from it.
async fn resolve_project(
    store: &dyn ProjectStore,
    raw_id: Option<&str>,
) -> Result<Project, HookError> {
    let Some(id) = raw_id.and_then(|raw| raw.parse::<ProjectId>().ok()) else {
        debug!(raw_id, "unusable project identifier");
        return Err(HookError::ProjectNotFound);
    };

    match store.find_project(id).await? {
        Some(project) => Ok(project),
        None => {
            debug!(%id, "unknown project");
            Err(HookError::ProjectNotFound)
        },
    }
}

/// The empty success payload every accepted event gets.
fn empty_ok() -> Response {
    (StatusCode::OK, Json(serde_json::json!({}))).into_response()
}

/// Maps a pipeline failure to its response.
fn error_response(err: &HookError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        error!(error = %err, "webhook processing failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let body = ErrorResponse {
        error: ErrorDetail { code: err.kind(), message: err.to_string() },
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use tablero_core::error::StoreError;

    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let response = error_response(&HookError::ProjectNotFound);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(&HookError::BadSignature);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_server_fault() {
        let err = HookError::Store(StoreError::Unavailable("down".into()));
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
