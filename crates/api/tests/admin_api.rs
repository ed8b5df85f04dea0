//! Admin dashboard: statistics and the synthesized notification feed.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn statistics_on_empty_database(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/admin/statistics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["totalProjects"], 0);
    assert_eq!(json["totalDocuments"], 0);
    assert_eq!(json["totalRevenue"], 0.0);
    assert_eq!(json["averageProjectPrice"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn statistics_count_by_status(pool: PgPool) {
    let available = common::create_project(&pool, "Available").await;
    let requested = common::create_project(&pool, "Requested").await;
    common::create_project_in_construction(&pool, "Building").await;
    post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{}/request", requested["id"].as_str().unwrap()),
    )
    .await;

    let doc = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            &format!(
                "/api/v1/admin/projects/{}/documents",
                available["id"].as_str().unwrap()
            ),
            json!({"title": "Survey"}),
        )
        .await,
    )
    .await;
    post_json(
        common::build_test_app(pool.clone()),
        &format!(
            "/api/v1/admin/projects/{}/documents",
            available["id"].as_str().unwrap()
        ),
        json!({"title": "Plan"}),
    )
    .await;
    post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/documents/{}/approve", doc["id"].as_str().unwrap()),
    )
    .await;

    let json = body_json(get(common::build_test_app(pool), "/api/v1/admin/statistics").await).await;
    assert_eq!(json["totalProjects"], 3);
    assert_eq!(json["availableProjects"], 1);
    assert_eq!(json["requestedProjects"], 1);
    assert_eq!(json["inProgressProjects"], 1);
    assert_eq!(json["totalDocuments"], 2);
    assert_eq!(json["pendingDocuments"], 1);
    assert_eq!(json["approvedDocuments"], 1);
    assert_eq!(json["rejectedDocuments"], 0);
    assert_eq!(json["averageProjectPrice"], 12500000.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notifications_list_pending_work(pool: PgPool) {
    let requested = common::create_project(&pool, "Awaiting decision").await;
    let requested_id = requested["id"].as_str().unwrap();
    post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{requested_id}/request"),
    )
    .await;
    let doc = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/admin/projects/{requested_id}/documents"),
            json!({"title": "Soil report"}),
        )
        .await,
    )
    .await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/notifications?unreadOnly=true",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let feed = body_json(response).await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 2);

    // The document was submitted after the request, so it comes first.
    assert_eq!(feed[0]["type"], "new_document");
    assert_eq!(feed[0]["documentId"], doc["id"]);
    assert_eq!(feed[1]["type"], "new_request");
    assert_eq!(feed[1]["projectId"], requested_id);
    assert!(feed.iter().all(|n| n["isRead"] == false));

    // Approving the document removes it from the feed.
    post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/documents/{}/approve", doc["id"].as_str().unwrap()),
    )
    .await;
    let feed = body_json(get(common::build_test_app(pool), "/api/v1/admin/notifications").await).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn editing_a_requested_project_keeps_its_feed_position(pool: PgPool) {
    let older = common::create_project(&pool, "Older").await;
    let newer = common::create_project(&pool, "Newer").await;
    for project in [&older, &newer] {
        post(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/projects/{}/request", project["id"].as_str().unwrap()),
        )
        .await;
    }

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/projects/{}", older["id"].as_str().unwrap()),
        json!({"description": "edited"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let feed = body_json(get(common::build_test_app(pool), "/api/v1/admin/notifications").await).await;
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["projectId"], newer["id"]);
    assert_eq!(feed[0]["createdAt"], newer["createdAt"]);
    assert_eq!(feed[1]["projectId"], older["id"]);
    assert_eq!(feed[1]["createdAt"], older["createdAt"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_notification_read_is_accepted(pool: PgPool) {
    let response = post(
        common::build_test_app(pool),
        &format!("/api/v1/admin/notifications/{}/read", uuid::Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
