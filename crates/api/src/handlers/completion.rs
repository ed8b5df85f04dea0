//! Handlers for construction completion: the derived completion status and
//! the final documents the client signs at handover.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mosstroi_core::approval::{self, require_reason};
use mosstroi_core::completion;
use mosstroi_core::types::{DbId, Timestamp};
use mosstroi_db::models::document::{CreateDocument, RejectReason};
use mosstroi_db::models::final_document::FinalDocument;
use mosstroi_db::repositories::{ConstructionSiteRepo, FinalDocumentRepo};
use serde::Serialize;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::project::find_project;
use crate::response::EmptyResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStatusResponse {
    pub project_id: DbId,
    pub is_completed: bool,
    pub completion_date: Option<Timestamp>,
    pub progress: f64,
    pub documents: Vec<FinalDocument>,
}

async fn find_final_document(
    conn: &mut PgConnection,
    project_id: DbId,
    document_id: DbId,
) -> AppResult<FinalDocument> {
    find_project(&mut *conn, project_id).await?;
    FinalDocumentRepo::find(conn, project_id, document_id)
        .await?
        .ok_or_else(|| AppError::not_found("FinalDocument", document_id))
}

/// GET /api/v1/projects/{id}/completion-status
///
/// Computed on every read. A project without a site reports progress 0.
pub async fn completion_status(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<CompletionStatusResponse>> {
    let mut conn = state.pool.acquire().await?;
    find_project(&mut conn, project_id).await?;
    let progress = ConstructionSiteRepo::find_by_project(&mut *conn, project_id)
        .await?
        .map_or(0.0, |site| site.progress);
    let documents = FinalDocumentRepo::list_by_project(&mut *conn, project_id).await?;

    let summary = completion::summarize(
        progress,
        documents.iter().map(|d| (d.status, d.signed_at)),
    );
    Ok(Json(CompletionStatusResponse {
        project_id,
        is_completed: summary.is_completed,
        completion_date: summary.completion_date,
        progress,
        documents,
    }))
}

/// GET /api/v1/projects/{id}/final-documents
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<FinalDocument>>> {
    let mut conn = state.pool.acquire().await?;
    find_project(&mut conn, project_id).await?;
    Ok(Json(
        FinalDocumentRepo::list_by_project(&mut *conn, project_id).await?,
    ))
}

/// GET /api/v1/projects/{id}/final-documents/{doc_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, document_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<FinalDocument>> {
    let mut conn = state.pool.acquire().await?;
    Ok(Json(
        find_final_document(&mut conn, project_id, document_id).await?,
    ))
}

/// POST /api/v1/projects/{id}/final-documents/{doc_id}/sign
pub async fn sign(
    State(state): State<AppState>,
    Path((project_id, document_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<EmptyResponse>> {
    let mut tx = state.pool.begin().await?;
    let document = find_final_document(&mut tx, project_id, document_id).await?;
    approval::sign_final_document(document.status)?;
    FinalDocumentRepo::sign(&mut *tx, document_id).await?;
    tx.commit().await?;

    tracing::info!(%project_id, document_id = %document_id, "Final document signed");
    Ok(Json(EmptyResponse::default()))
}

/// POST /api/v1/projects/{id}/final-documents/{doc_id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path((project_id, document_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<RejectReason>,
) -> AppResult<Json<EmptyResponse>> {
    let reason = require_reason(&input.reason)?;
    let mut tx = state.pool.begin().await?;
    let document = find_final_document(&mut tx, project_id, document_id).await?;
    approval::reject_final_document(document.status)?;
    FinalDocumentRepo::reject(&mut *tx, document_id, &reason).await?;
    tx.commit().await?;

    tracing::info!(%project_id, document_id = %document_id, "Final document rejected");
    Ok(Json(EmptyResponse::default()))
}

/// POST /api/v1/admin/projects/{id}/final-documents
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateDocument>,
) -> AppResult<(StatusCode, Json<FinalDocument>)> {
    let mut tx = state.pool.begin().await?;
    find_project(&mut tx, project_id).await?;
    let document = FinalDocumentRepo::create(&mut *tx, project_id, &input).await?;
    tx.commit().await?;

    tracing::info!(document_id = %document.id, %project_id, "Final document submitted");
    Ok((StatusCode::CREATED, Json(document)))
}
