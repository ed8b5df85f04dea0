#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use mosstroi_api::auth::jwt::JwtConfig;
use mosstroi_api::config::ServerConfig;
use mosstroi_api::router::build_app_router;
use mosstroi_api::state::AppState;
use mosstroi_events::EventBus;

/// A `ServerConfig` with local defaults and the chat relay disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        broadcast_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 30,
            refresh_token_expiry_days: 7,
        },
    }
}

/// The production router (same middleware stack) over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool, Arc::new(EventBus::default()))
}

/// Like [`build_test_app`], with a caller-owned event bus so tests can
/// subscribe to published events.
pub fn build_test_app_with_bus(pool: PgPool, event_bus: Arc<EventBus>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a catalogue project through the admin endpoint and return its JSON.
pub async fn create_project(pool: &PgPool, name: &str) -> Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/admin/projects",
        serde_json::json!({
            "name": name,
            "address": "Moscow, Lenina 10",
            "description": "Two-storey family house",
            "area": 145.5,
            "floors": 2,
            "price": 12500000.0,
            "bedrooms": 4,
            "bathrooms": 2,
            "stages": ["Foundation", "Walls", "Roof"]
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Create a project and drive it through request and approval. Returns the
/// project JSON as returned by the approval.
pub async fn create_project_in_construction(pool: &PgPool, name: &str) -> Value {
    let project = create_project(pool, name).await;
    let id = project["id"].as_str().unwrap();

    let response = post(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}/request"),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::NO_CONTENT);

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/projects/{id}/approve-request"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await
}

/// Id of the construction site belonging to `project_id`.
pub async fn site_id_for(pool: &PgPool, project_id: &str) -> String {
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/construction-sites/project/{project_id}"),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["id"].as_str().unwrap().to_string()
}
