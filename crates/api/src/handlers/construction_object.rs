//! Handlers for construction objects: the mobile app's view of a building
//! under construction, and the completion gate.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mosstroi_core::completion::{self, CompleteOutcome, SiteGate};
use mosstroi_core::types::DbId;
use mosstroi_db::models::construction_site::{
    ConstructionObject, ConstructionSite, UpdateDocumentsStatus,
};
use mosstroi_db::models::project::Project;
use mosstroi_db::models::project_stage::{ProjectStage, UpdateStageStatus};
use mosstroi_db::repositories::{ChatRepo, ConstructionSiteRepo, ProjectRepo, StageRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::construction_site::find_site;
use crate::handlers::project::find_project;
use crate::state::AppState;

fn build_object(
    site: ConstructionSite,
    project: Project,
    stages: Vec<ProjectStage>,
    chat_id: Option<DbId>,
) -> ConstructionObject {
    ConstructionObject {
        id: site.id,
        project_id: project.id,
        name: project.name,
        address: project.address,
        description: project.description.unwrap_or_default(),
        area: project.area,
        floors: project.floors,
        bedrooms: project.bedrooms,
        bathrooms: project.bathrooms,
        price: project.price,
        image_url: project.image_url,
        stages,
        chat_id,
        progress: site.progress,
        all_documents_signed: site.all_documents_signed,
        is_completed: site.is_completed,
    }
}

/// GET /api/v1/construction-objects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ConstructionObject>>> {
    let mut conn = state.pool.acquire().await?;
    let sites = ConstructionSiteRepo::list(&mut *conn).await?;
    let project_ids: Vec<DbId> = sites.iter().map(|s| s.project_id).collect();

    let mut projects: HashMap<DbId, Project> = ProjectRepo::find_many(&mut *conn, &project_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let mut stages: HashMap<DbId, Vec<ProjectStage>> = HashMap::new();
    for stage in StageRepo::list_by_projects(&mut *conn, &project_ids).await? {
        stages.entry(stage.project_id).or_default().push(stage);
    }
    let chats: HashMap<DbId, DbId> = ChatRepo::list_active_by_projects(&mut *conn, &project_ids)
        .await?
        .into_iter()
        .map(|c| (c.project_id, c.id))
        .collect();

    let mut objects = Vec::with_capacity(sites.len());
    for site in sites {
        // Sites cascade with their project, so a missing project means the
        // row vanished between the two reads.
        let Some(project) = projects.remove(&site.project_id) else {
            continue;
        };
        let project_stages = stages.remove(&project.id).unwrap_or_default();
        let chat_id = chats.get(&project.id).copied();
        objects.push(build_object(site, project, project_stages, chat_id));
    }
    Ok(Json(objects))
}

/// GET /api/v1/construction-objects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ConstructionObject>> {
    let mut conn = state.pool.acquire().await?;
    let site = find_site(&mut conn, id).await?;
    let project = find_project(&mut conn, site.project_id).await?;
    let stages = StageRepo::list_by_project(&mut *conn, project.id).await?;
    let chat_id = ChatRepo::find_active_by_project(&mut *conn, project.id)
        .await?
        .map(|c| c.id);
    Ok(Json(build_object(site, project, stages, chat_id)))
}

/// POST /api/v1/construction-objects/{id}/complete
///
/// Completing an already completed object succeeds without changes.
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let site = find_site(&mut tx, id).await?;
    let outcome = completion::complete(SiteGate {
        progress: site.progress,
        all_documents_signed: site.all_documents_signed,
        is_completed: site.is_completed,
    })?;
    if outcome == CompleteOutcome::Completed {
        ConstructionSiteRepo::mark_completed(&mut *tx, id).await?;
        tracing::info!(site_id = %id, project_id = %site.project_id, "Construction completed");
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/construction-objects/by-project/{project_id}/documents-status
pub async fn update_documents_status(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateDocumentsStatus>,
) -> AppResult<StatusCode> {
    let updated = ConstructionSiteRepo::set_documents_signed(
        &state.pool,
        project_id,
        input.all_documents_signed,
    )
    .await?;
    if !updated {
        return Err(AppError::not_found("ConstructionSite", project_id));
    }
    tracing::info!(
        %project_id,
        all_documents_signed = input.all_documents_signed,
        "Document signing status updated"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/admin/construction-objects/{id}/stages/{stage_id}/status
pub async fn update_stage_status(
    State(state): State<AppState>,
    Path((id, stage_id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateStageStatus>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let site = find_site(&mut tx, id).await?;
    if !StageRepo::set_status(&mut *tx, site.project_id, stage_id, input.status).await? {
        return Err(AppError::not_found("ProjectStage", stage_id));
    }
    tx.commit().await?;

    tracing::info!(site_id = %id, %stage_id, status = %input.status, "Stage status updated");
    Ok(StatusCode::NO_CONTENT)
}
