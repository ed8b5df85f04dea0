//! Construction sites, the completion gate and final documents over HTTP.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn set_progress(pool: &PgPool, site_id: &str, progress: f64) -> StatusCode {
    patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/construction-sites/{site_id}/progress"),
        json!({"progress": progress}),
    )
    .await
    .status()
}

async fn set_documents_signed(pool: &PgPool, project_id: &str, signed: bool) -> StatusCode {
    patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/construction-objects/by-project/{project_id}/documents-status"),
        json!({"allDocumentsSigned": signed}),
    )
    .await
    .status()
}

async fn complete(pool: &PgPool, site_id: &str) -> StatusCode {
    post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/construction-objects/{site_id}/complete"),
    )
    .await
    .status()
}

async fn object(pool: &PgPool, site_id: &str) -> Value {
    body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/construction-objects/{site_id}"),
        )
        .await,
    )
    .await
}

async fn completion_status(pool: &PgPool, project_id: &str) -> Value {
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/completion-status"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn create_final_document(pool: &PgPool, project_id: &str, title: &str) -> String {
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/projects/{project_id}/final-documents"),
        json!({"title": title}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    json["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Sites and objects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn construction_object_combines_project_site_and_chat(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Object").await;
    let project_id = project["id"].as_str().unwrap();
    let site_id = common::site_id_for(&pool, project_id).await;

    let json = object(&pool, &site_id).await;
    assert_eq!(json["projectId"], project_id);
    assert_eq!(json["name"], "Object");
    assert_eq!(json["progress"], 0.0);
    assert_eq!(json["isCompleted"], false);
    assert!(json["chatId"].is_string());
    assert_eq!(json["stages"].as_array().unwrap().len(), 3);

    let list = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/construction-objects").await,
    )
    .await;
    assert!(list.as_array().unwrap().iter().any(|o| o["id"] == site_id.as_str()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn site_for_catalogue_project_is_404(pool: PgPool) {
    let project = common::create_project(&pool, "No site yet").await;
    let response = get(
        common::build_test_app(pool),
        &format!(
            "/api/v1/construction-sites/project/{}",
            project["id"].as_str().unwrap()
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_outside_unit_range_is_422(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Range").await;
    let site_id = common::site_id_for(&pool, project["id"].as_str().unwrap()).await;

    assert_eq!(set_progress(&pool, &site_id, 1.5).await, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(set_progress(&pool, &site_id, -0.1).await, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(set_progress(&pool, &site_id, 0.4).await, StatusCode::NO_CONTENT);
    assert_eq!(object(&pool, &site_id).await["progress"], 0.4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cameras_are_managed_per_site(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Cameras").await;
    let project_id = project["id"].as_str().unwrap();
    let site_id = common::site_id_for(&pool, project_id).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/construction-sites/{site_id}/cameras"),
        json!({"name": "North gate", "streamUrl": "rtsp://cams.example/1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let camera = body_json(response).await;
    let camera_id = camera["id"].as_str().unwrap();
    assert_eq!(camera["isActive"], true);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/construction-sites/{site_id}/cameras/{camera_id}"),
        json!({"isActive": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let camera = body_json(response).await;
    assert_eq!(camera["isActive"], false);
    assert_eq!(camera["name"], "North gate");

    let view = body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/construction-sites/project/{project_id}"),
        )
        .await,
    )
    .await;
    assert_eq!(view["projectName"], "Cameras");
    assert_eq!(view["cameras"].as_array().unwrap().len(), 1);

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/construction-sites/{site_id}/cameras/{camera_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/construction-sites/{site_id}/cameras/{camera_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stage_status_is_updated_through_the_object(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Stages").await;
    let project_id = project["id"].as_str().unwrap();
    let site_id = common::site_id_for(&pool, project_id).await;
    let stage_id = project["stages"][0]["id"].as_str().unwrap();

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/construction-objects/{site_id}/stages/{stage_id}/status"),
        json!({"status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(object(&pool, &site_id).await["stages"][0]["status"], "completed");

    let response = patch_json(
        common::build_test_app(pool),
        &format!(
            "/api/v1/admin/construction-objects/{site_id}/stages/{}/status",
            uuid::Uuid::new_v4()
        ),
        json!({"status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Completion gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn almost_finished_site_cannot_complete(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Almost").await;
    let project_id = project["id"].as_str().unwrap();
    let site_id = common::site_id_for(&pool, project_id).await;

    set_progress(&pool, &site_id, 0.99).await;
    assert_eq!(set_documents_signed(&pool, project_id, true).await, StatusCode::NO_CONTENT);
    assert_eq!(complete(&pool, &site_id).await, StatusCode::BAD_REQUEST);
    assert_eq!(object(&pool, &site_id).await["isCompleted"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsigned_documents_block_completion(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Unsigned").await;
    let site_id = common::site_id_for(&pool, project["id"].as_str().unwrap()).await;

    set_progress(&pool, &site_id, 1.0).await;
    assert_eq!(complete(&pool, &site_id).await, StatusCode::BAD_REQUEST);
    assert_eq!(object(&pool, &site_id).await["isCompleted"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_happens_once(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Done").await;
    let project_id = project["id"].as_str().unwrap();
    let site_id = common::site_id_for(&pool, project_id).await;

    set_progress(&pool, &site_id, 1.0).await;
    set_documents_signed(&pool, project_id, true).await;

    assert_eq!(complete(&pool, &site_id).await, StatusCode::NO_CONTENT);
    assert_eq!(object(&pool, &site_id).await["isCompleted"], true);
    assert_eq!(complete(&pool, &site_id).await, StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn documents_status_for_project_without_site_is_404(pool: PgPool) {
    let project = common::create_project(&pool, "Catalogue only").await;
    assert_eq!(
        set_documents_signed(&pool, project["id"].as_str().unwrap(), true).await,
        StatusCode::NOT_FOUND
    );
}

// ---------------------------------------------------------------------------
// Final documents and completion status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn signed_document_at_full_progress_completes_project(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Handover").await;
    let project_id = project["id"].as_str().unwrap();
    let site_id = common::site_id_for(&pool, project_id).await;
    let doc_id = create_final_document(&pool, project_id, "Acceptance certificate").await;

    let status = completion_status(&pool, project_id).await;
    assert_eq!(status["isCompleted"], false);
    assert!(status["completionDate"].is_null());

    set_progress(&pool, &site_id, 1.0).await;
    let response = post(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/final-documents/{doc_id}/sign"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));

    let status = completion_status(&pool, project_id).await;
    assert_eq!(status["isCompleted"], true);
    let signed_at = status["documents"][0]["signedAt"].clone();
    assert!(signed_at.is_string());
    assert_eq!(status["completionDate"], signed_at);

    set_progress(&pool, &site_id, 0.99).await;
    let status = completion_status(&pool, project_id).await;
    assert_eq!(status["isCompleted"], false);
    assert!(status["completionDate"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signed_and_rejected_final_documents_are_terminal(pool: PgPool) {
    let project = common::create_project_in_construction(&pool, "Terminal").await;
    let project_id = project["id"].as_str().unwrap();
    let signed = create_final_document(&pool, project_id, "Certificate").await;
    let rejected = create_final_document(&pool, project_id, "Warranty").await;
    let base = format!("/api/v1/projects/{project_id}/final-documents");

    post(common::build_test_app(pool.clone()), &format!("{base}/{signed}/sign")).await;
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("{base}/{signed}/reject"),
        json!({"reason": "Too late"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("{base}/{rejected}/reject"),
        json!({"reason": "Wrong warranty term"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post(common::build_test_app(pool.clone()), &format!("{base}/{rejected}/sign")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(common::build_test_app(pool.clone()), &format!("{base}/{rejected}")).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "rejected");
    assert_eq!(json["rejectionReason"], "Wrong warranty term");
    assert!(json["signedAt"].is_null());

    let list = body_json(get(common::build_test_app(pool), &base).await).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn final_document_of_another_project_is_404(pool: PgPool) {
    let owner = common::create_project(&pool, "Owner").await;
    let other = common::create_project(&pool, "Other").await;
    let doc_id = create_final_document(&pool, owner["id"].as_str().unwrap(), "Deed").await;

    let response = get(
        common::build_test_app(pool),
        &format!(
            "/api/v1/projects/{}/final-documents/{doc_id}",
            other["id"].as_str().unwrap()
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
