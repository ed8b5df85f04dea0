//! Handlers for construction documents and their review decisions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mosstroi_core::approval::{self, require_reason};
use mosstroi_core::batch;
use mosstroi_core::status::DocumentStatus;
use mosstroi_core::types::DbId;
use mosstroi_db::models::document::{CreateDocument, Document, RejectReason};
use mosstroi_db::repositories::{DocumentRepo, ProjectRepo};
use serde::Deserialize;
use sqlx::PgConnection;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::project::BatchIds;
use crate::query::DocumentListParams;
use crate::response::EmptyResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct BatchRejectDocuments {
    #[validate(length(min = 1))]
    pub ids: Vec<DbId>,
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

async fn find_document(conn: &mut PgConnection, id: DbId) -> AppResult<Document> {
    DocumentRepo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Document", id))
}

/// GET /api/v1/documents
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DocumentListParams>,
) -> AppResult<Json<Vec<Document>>> {
    let documents = DocumentRepo::list(&state.pool, params.project_id, params.status).await?;
    Ok(Json(documents))
}

/// GET /api/v1/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Document>> {
    let mut conn = state.pool.acquire().await?;
    Ok(Json(find_document(&mut conn, id).await?))
}

/// POST /api/v1/documents/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EmptyResponse>> {
    let mut tx = state.pool.begin().await?;
    let document = find_document(&mut tx, id).await?;
    approval::approve_document(document.status)?;
    DocumentRepo::approve(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(document_id = %id, project_id = %document.project_id, "Document approved");
    Ok(Json(EmptyResponse::default()))
}

/// POST /api/v1/documents/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<RejectReason>,
) -> AppResult<Json<EmptyResponse>> {
    let reason = require_reason(&input.reason)?;
    let mut tx = state.pool.begin().await?;
    let document = find_document(&mut tx, id).await?;
    approval::reject_document(document.status)?;
    DocumentRepo::reject(&mut *tx, id, &reason).await?;
    tx.commit().await?;

    tracing::info!(document_id = %id, project_id = %document.project_id, "Document rejected");
    Ok(Json(EmptyResponse::default()))
}

/// POST /api/v1/admin/projects/{id}/documents
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateDocument>,
) -> AppResult<(StatusCode, Json<Document>)> {
    let mut tx = state.pool.begin().await?;
    ProjectRepo::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;
    let document = DocumentRepo::create(&mut *tx, project_id, &input).await?;
    tx.commit().await?;

    tracing::info!(document_id = %document.id, %project_id, "Document submitted");
    Ok((StatusCode::CREATED, Json(document)))
}

/// POST /api/v1/admin/documents/batch-approve
///
/// Only pending documents qualify; one ineligible id fails the whole batch.
pub async fn batch_approve(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<BatchIds>,
) -> AppResult<StatusCode> {
    let ids = batch::normalize_ids(&input.ids)?;
    let mut tx = state.pool.begin().await?;
    let eligible =
        DocumentRepo::find_many_in_status(&mut *tx, &ids, DocumentStatus::Pending).await?;
    batch::ensure_complete(
        ids.len(),
        eligible.len(),
        "documents were not found or are not in pending status",
    )?;
    let updated = DocumentRepo::approve_many(&mut *tx, &ids).await?;
    tx.commit().await?;

    tracing::info!(count = updated, "Documents approved in batch");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/documents/batch-reject
pub async fn batch_reject(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<BatchRejectDocuments>,
) -> AppResult<StatusCode> {
    let ids = batch::normalize_ids(&input.ids)?;
    let reason = require_reason(&input.reason)?;
    let mut tx = state.pool.begin().await?;
    let eligible =
        DocumentRepo::find_many_in_status(&mut *tx, &ids, DocumentStatus::Pending).await?;
    batch::ensure_complete(
        ids.len(),
        eligible.len(),
        "documents were not found or are not in pending status",
    )?;
    let updated = DocumentRepo::reject_many(&mut *tx, &ids, &reason).await?;
    tx.commit().await?;

    tracing::info!(count = updated, "Documents rejected in batch");
    Ok(StatusCode::NO_CONTENT)
}
