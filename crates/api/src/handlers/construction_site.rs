//! Handlers for construction sites and their cameras.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mosstroi_core::types::DbId;
use mosstroi_db::models::camera::{Camera, CreateCamera, UpdateCamera};
use mosstroi_db::models::construction_site::{
    ConstructionSite, ConstructionSiteView, UpdateProgress,
};
use mosstroi_db::repositories::{CameraRepo, ConstructionSiteRepo};
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::project::find_project;
use crate::state::AppState;

pub(crate) async fn find_site(conn: &mut PgConnection, id: DbId) -> AppResult<ConstructionSite> {
    ConstructionSiteRepo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("ConstructionSite", id))
}

/// GET /api/v1/construction-sites/project/{project_id}
pub async fn get_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ConstructionSiteView>> {
    let mut conn = state.pool.acquire().await?;
    let project = find_project(&mut conn, project_id).await?;
    let site = ConstructionSiteRepo::find_by_project(&mut *conn, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("ConstructionSite", project_id))?;
    let cameras = CameraRepo::list_by_site(&mut *conn, site.id).await?;

    Ok(Json(ConstructionSiteView {
        id: site.id,
        project_id,
        project_name: project.name,
        address: project.address,
        cameras,
        start_date: site.start_date,
        expected_completion_date: site.expected_completion_date,
        progress: site.progress,
    }))
}

/// GET /api/v1/construction-sites/{site_id}/cameras
pub async fn list_cameras(
    State(state): State<AppState>,
    Path(site_id): Path<DbId>,
) -> AppResult<Json<Vec<Camera>>> {
    let mut conn = state.pool.acquire().await?;
    find_site(&mut conn, site_id).await?;
    Ok(Json(CameraRepo::list_by_site(&mut *conn, site_id).await?))
}

/// GET /api/v1/construction-sites/{site_id}/cameras/{camera_id}
pub async fn get_camera(
    State(state): State<AppState>,
    Path((site_id, camera_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Camera>> {
    let mut conn = state.pool.acquire().await?;
    find_site(&mut conn, site_id).await?;
    let camera = CameraRepo::find(&mut *conn, site_id, camera_id)
        .await?
        .ok_or_else(|| AppError::not_found("Camera", camera_id))?;
    Ok(Json(camera))
}

/// PATCH /api/v1/admin/construction-sites/{site_id}/progress
pub async fn update_progress(
    State(state): State<AppState>,
    Path(site_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateProgress>,
) -> AppResult<StatusCode> {
    if ConstructionSiteRepo::set_progress(&state.pool, site_id, input.progress).await? {
        tracing::info!(%site_id, progress = input.progress, "Construction progress updated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ConstructionSite", site_id))
    }
}

/// POST /api/v1/admin/construction-sites/{site_id}/cameras
pub async fn create_camera(
    State(state): State<AppState>,
    Path(site_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateCamera>,
) -> AppResult<(StatusCode, Json<Camera>)> {
    let mut tx = state.pool.begin().await?;
    find_site(&mut tx, site_id).await?;
    let camera = CameraRepo::create(&mut *tx, site_id, &input).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(camera)))
}

/// PUT /api/v1/admin/construction-sites/{site_id}/cameras/{camera_id}
pub async fn update_camera(
    State(state): State<AppState>,
    Path((site_id, camera_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateCamera>,
) -> AppResult<Json<Camera>> {
    let camera = CameraRepo::update(&state.pool, site_id, camera_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Camera", camera_id))?;
    Ok(Json(camera))
}

/// DELETE /api/v1/admin/construction-sites/{site_id}/cameras/{camera_id}
pub async fn delete_camera(
    State(state): State<AppState>,
    Path((site_id, camera_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if CameraRepo::delete(&state.pool, site_id, camera_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Camera", camera_id))
    }
}
