//! Handlers for projects: the public catalogue, construction requests and
//! the admin lifecycle decisions.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mosstroi_core::approval::require_reason;
use mosstroi_core::batch;
use mosstroi_core::project_lifecycle::{self, DEFAULT_SPECIALIST_NAME};
use mosstroi_core::status::ProjectStatus;
use mosstroi_core::types::DbId;
use mosstroi_db::models::document::RejectReason;
use mosstroi_db::models::project::{
    ApproveProject, CreateProject, Project, ProjectWithStages, UpdateProject,
};
use mosstroi_db::models::project_stage::ProjectStage;
use mosstroi_db::repositories::{ChatRepo, ConstructionSiteRepo, ProjectRepo, StageRepo};
use serde::Deserialize;
use sqlx::PgConnection;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// Body of the batch approve endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchIds {
    #[validate(length(min = 1))]
    pub ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_project(conn: &mut PgConnection, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))
}

async fn with_stages(conn: &mut PgConnection, project: Project) -> AppResult<ProjectWithStages> {
    let stages = StageRepo::list_by_project(conn, project.id).await?;
    Ok(ProjectWithStages { project, stages })
}

/// Attach stages to many projects with a single query, keeping the order of
/// `projects`.
async fn attach_stages(
    conn: &mut PgConnection,
    projects: Vec<Project>,
) -> AppResult<Vec<ProjectWithStages>> {
    let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
    let mut by_project: HashMap<DbId, Vec<ProjectStage>> = HashMap::new();
    for stage in StageRepo::list_by_projects(conn, &ids).await? {
        by_project.entry(stage.project_id).or_default().push(stage);
    }
    Ok(projects
        .into_iter()
        .map(|project| {
            let stages = by_project.remove(&project.id).unwrap_or_default();
            ProjectWithStages { project, stages }
        })
        .collect())
}

/// Side effects of entering `construction`: the project gets its site and an
/// active specialist chat. Both inserts are no-ops when the rows exist.
async fn start_construction(conn: &mut PgConnection, project_id: DbId) -> AppResult<()> {
    let site_created = ConstructionSiteRepo::ensure_for_project(&mut *conn, project_id).await?;
    let chat_created =
        ChatRepo::ensure_active_for_project(&mut *conn, project_id, DEFAULT_SPECIALIST_NAME)
            .await?;
    tracing::info!(%project_id, site_created, chat_created, "Construction started");
    Ok(())
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectWithStages>>> {
    let mut conn = state.pool.acquire().await?;
    let projects = ProjectRepo::list(&mut *conn).await?;
    Ok(Json(attach_stages(&mut conn, projects).await?))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithStages>> {
    let mut conn = state.pool.acquire().await?;
    let project = find_project(&mut conn, id).await?;
    Ok(Json(with_stages(&mut conn, project).await?))
}

/// POST /api/v1/projects/{id}/request
///
/// Repeating a pending request succeeds without changing anything.
pub async fn request_construction(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let project = find_project(&mut tx, id).await?;
    let next = project_lifecycle::request(project.status)?;
    if next != project.status {
        ProjectRepo::set_status(&mut *tx, id, next).await?;
        tracing::info!(project_id = %id, "Construction requested");
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/projects
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectWithStages>)> {
    let mut tx = state.pool.begin().await?;
    let project = ProjectRepo::create(&mut *tx, &input).await?;
    let names: Vec<String> = input.stages.iter().map(|s| s.trim().to_string()).collect();
    let stages = if names.is_empty() {
        Vec::new()
    } else {
        StageRepo::create_many(&mut *tx, project.id, &names).await?
    };
    tx.commit().await?;

    tracing::info!(project_id = %project.id, stages = stages.len(), "Project created");
    Ok((StatusCode::CREATED, Json(ProjectWithStages { project, stages })))
}

/// PUT /api/v1/admin/projects/{id}
///
/// A `status` in the body follows the same transition rules as the named
/// lifecycle endpoints; entering `construction` creates the site and chat.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<Json<ProjectWithStages>> {
    let mut tx = state.pool.begin().await?;
    let current = find_project(&mut tx, id).await?;
    if let Some(to) = input.status {
        project_lifecycle::check_transition(current.status, to)?;
        if project_lifecycle::starts_construction(current.status, to) {
            start_construction(&mut tx, id).await?;
        }
    }
    let project = ProjectRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    let project = with_stages(&mut tx, project).await?;
    tx.commit().await?;

    if project.project.status != current.status {
        tracing::info!(
            project_id = %id,
            from = %current.status,
            to = %project.project.status,
            "Project status changed by admin"
        );
    }
    Ok(Json(project))
}

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = %id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", id))
    }
}

/// POST /api/v1/admin/projects/{id}/approve-request
pub async fn approve_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<ApproveProject>,
) -> AppResult<Json<ProjectWithStages>> {
    let mut tx = state.pool.begin().await?;
    let current = find_project(&mut tx, id).await?;
    let next = project_lifecycle::approve(current.status)?;
    start_construction(&mut tx, id).await?;

    let changes = UpdateProject {
        address: input.address,
        status: Some(next),
        ..Default::default()
    };
    let project = ProjectRepo::update(&mut *tx, id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    let project = with_stages(&mut tx, project).await?;
    tx.commit().await?;

    tracing::info!(project_id = %id, "Construction request approved");
    Ok(Json(project))
}

/// POST /api/v1/admin/projects/{id}/reject-request
///
/// The reason is required but not stored; it only reaches the log.
pub async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<RejectReason>,
) -> AppResult<StatusCode> {
    let reason = require_reason(&input.reason)?;
    let mut tx = state.pool.begin().await?;
    let current = find_project(&mut tx, id).await?;
    let next = project_lifecycle::reject(current.status)?;
    ProjectRepo::set_status(&mut *tx, id, next).await?;
    tx.commit().await?;

    tracing::info!(project_id = %id, %reason, "Construction request rejected");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/projects/batch-approve
///
/// All or nothing: if any id is unknown or not awaiting a decision, nothing
/// is changed.
pub async fn batch_approve(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<BatchIds>,
) -> AppResult<Json<Vec<ProjectWithStages>>> {
    let ids = batch::normalize_ids(&input.ids)?;

    let mut tx = state.pool.begin().await?;
    let eligible = ProjectRepo::find_many_in_status(&mut *tx, &ids, ProjectStatus::Requested).await?;
    batch::ensure_complete(
        ids.len(),
        eligible.len(),
        "projects were not found or are not in requested status",
    )?;

    for id in &ids {
        start_construction(&mut tx, *id).await?;
    }
    let mut updated = ProjectRepo::set_status_many(&mut *tx, &ids, ProjectStatus::Construction).await?;
    updated.sort_by_key(|p| ids.iter().position(|id| *id == p.id));
    let projects = attach_stages(&mut tx, updated).await?;
    tx.commit().await?;

    tracing::info!(count = projects.len(), "Construction requests approved in batch");
    Ok(Json(projects))
}
