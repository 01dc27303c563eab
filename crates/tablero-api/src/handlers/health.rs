//! Health check handlers for service monitoring.
//!
//! Provides liveness, readiness, and health endpoints with a project store
//! connectivity check for orchestration systems like Kubernetes.

use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::server::AppState;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: HealthStatus,
    /// Timestamp when health check was performed
    pub timestamp: DateTime<Utc>,
    /// Individual component health checks
    pub checks: HealthChecks,
    /// Service version information
    pub version: String,
}

/// Overall health status enumeration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Critical systems failing
    Unhealthy,
}

/// Individual component health check results.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Project store connectivity
    pub project_store: ComponentHealth,
}

/// Health status for individual components.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: ComponentStatus,
    /// Optional error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Component-level health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Component is healthy
    Up,
    /// Component is experiencing issues
    Down,
}

/// Primary health check endpoint.
///
/// Performs a lightweight probe of the project store and returns structured
/// JSON with overall status and component details. Designed to be called
/// frequently by orchestration systems, so it avoids expensive operations.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Response {
    debug!("Performing health check");

    let started = Instant::now();
    let store_result = state.store.health_check().await;
    let elapsed = started.elapsed();

    let project_store = match store_result {
        Ok(()) => {
            debug!("Project store health check passed");
            ComponentHealth {
                status: ComponentStatus::Up,
                message: None,
                response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            }
        },
        Err(err) => {
            error!(error = %err, "Project store health check failed");
            ComponentHealth {
                status: ComponentStatus::Down,
                message: Some(err.to_string()),
                response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            }
        },
    };

    let status = match project_store.status {
        ComponentStatus::Up => HealthStatus::Healthy,
        ComponentStatus::Down => HealthStatus::Unhealthy,
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = HealthResponse {
        status,
        timestamp: Utc::now(),
        checks: HealthChecks { project_store },
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status_code, Json(response)).into_response()
}

/// Readiness check endpoint for Kubernetes probes.
///
/// Identical to the health check: the service is ready exactly when its
/// project store answers.
#[instrument(name = "readiness_check", skip(state))]
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    health_check(State(state)).await
}

/// Liveness check endpoint for Kubernetes probes.
///
/// Returns a minimal response indicating the process is alive; never
/// touches external dependencies.
#[instrument(name = "liveness_check")]
pub async fn liveness_check() -> Response {
    debug!("Performing liveness check");

    let response = serde_json::json!({
        "status": "alive",
        "timestamp": Utc::now(),
        "service": "tablero-api",
    });

    (StatusCode::OK, Json(response)).into_response()
}
