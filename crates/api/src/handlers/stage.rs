//! Admin handlers for project stages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mosstroi_core::types::DbId;
use mosstroi_db::models::project_stage::{CreateStage, ProjectStage, UpdateStage};
use mosstroi_db::repositories::{ProjectRepo, StageRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// POST /api/v1/admin/projects/{id}/stages
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateStage>,
) -> AppResult<(StatusCode, Json<ProjectStage>)> {
    let mut tx = state.pool.begin().await?;
    ProjectRepo::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;
    let stage = StageRepo::create(&mut *tx, project_id, input.name.trim()).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(stage)))
}

/// PUT /api/v1/admin/projects/{id}/stages/{stage_id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, stage_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateStage>,
) -> AppResult<Json<ProjectStage>> {
    let stage = StageRepo::update(&state.pool, project_id, stage_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("ProjectStage", stage_id))?;
    Ok(Json(stage))
}

/// DELETE /api/v1/admin/projects/{id}/stages/{stage_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, stage_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if StageRepo::delete(&state.pool, project_id, stage_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ProjectStage", stage_id))
    }
}
