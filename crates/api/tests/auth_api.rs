//! Token issuing and the bearer-protected profile endpoint.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn me(pool: &PgPool, token: &str) -> axum::http::Response<Body> {
    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    common::build_test_app(pool.clone()).oneshot(request).await.unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_issues_tokens_for_a_stable_user(pool: PgPool) {
    let body = json!({"email": "Client@Example.com", "password": "anything"});
    let login = |body| post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", body);
    let first = body_json(login(body.clone()).await).await;
    let second = body_json(login(body).await).await;

    assert!(first["accessToken"].is_string());
    assert!(first["refreshToken"].is_string());
    assert_eq!(first["user"]["email"], "client@example.com");
    assert_eq!(first["user"]["name"], "client");
    assert_eq!(first["user"]["id"], second["user"]["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_invalid_email_is_422(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        json!({"email": "not-an-email", "password": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_then_me_returns_profile(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/register",
        json!({
            "email": "ivan@example.com",
            "password": "secret",
            "name": "Ivan Petrov",
            "phone": "+7 900 000-00-00"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let auth = body_json(response).await;
    let token = auth["accessToken"].as_str().unwrap();

    let response = me(&pool, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["name"], "Ivan Petrov");
    assert_eq!(profile["phone"], "+7 900 000-00-00");
    assert_eq!(profile["id"], auth["user"]["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_an_access_token(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let auth = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/auth/login",
            json!({"email": "a@example.com", "password": "x"}),
        )
        .await,
    )
    .await;
    let refresh = auth["refreshToken"].as_str().unwrap();
    assert_eq!(me(&pool, refresh).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(me(&pool, "garbage").await.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_exchanges_refresh_token_only(pool: PgPool) {
    let auth = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/auth/login",
            json!({"email": "b@example.com", "password": "x"}),
        )
        .await,
    )
    .await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        json!({"refreshToken": auth["refreshToken"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_eq!(refreshed["user"]["email"], "b@example.com");

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/refresh",
        json!({"refresh_token": auth["accessToken"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
