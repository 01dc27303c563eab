//! Integration tests for the health, readiness, and liveness endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tablero_api::{create_router, AppState};
use tablero_hooks::HookRegistry;
use tablero_testing::{FailingStore, TestEnv};
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).expect("build request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes =
        axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response json")
}

fn failing_app() -> Router {
    create_router(AppState::new(Arc::new(FailingStore), Arc::new(HookRegistry::new())))
}

/// Health reports healthy with an answering store and includes the store
/// component detail.
#[tokio::test]
async fn health_reports_healthy_store() {
    let env = TestEnv::new();
    let app = create_router(AppState::new(env.store.clone(), env.registry()));

    let response = app.oneshot(get("/health")).await.expect("execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["project_store"]["status"], "up");
    assert!(body["version"].is_string());
}

/// Health degrades to 503 when the store is unreachable.
#[tokio::test]
async fn health_reports_unhealthy_store() {
    let response = failing_app().oneshot(get("/health")).await.expect("execute request");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["project_store"]["status"], "down");
    assert!(body["checks"]["project_store"]["message"].is_string());
}

/// Readiness mirrors the health verdict.
#[tokio::test]
async fn readiness_mirrors_health() {
    let env = TestEnv::new();
    let app = create_router(AppState::new(env.store.clone(), env.registry()));

    let response = app.oneshot(get("/ready")).await.expect("execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = failing_app().oneshot(get("/ready")).await.expect("execute request");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

/// Liveness never consults the store: it passes even when the store is
/// down.
#[tokio::test]
async fn liveness_ignores_store_state() {
    let response = failing_app().oneshot(get("/live")).await.expect("execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "alive");
}
