//! Admin dashboard handlers: statistics and the notification feed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mosstroi_core::notification::{self, Notification, PendingDocument, RequestedProject};
use mosstroi_core::status::{DocumentStatus, ProjectStatus};
use mosstroi_core::types::DbId;
use mosstroi_db::models::statistics::Statistics;
use mosstroi_db::repositories::{DocumentRepo, ProjectRepo, StatisticsRepo};

use crate::error::AppResult;
use crate::query::NotificationParams;
use crate::state::AppState;

/// GET /api/v1/admin/statistics
pub async fn statistics(State(state): State<AppState>) -> AppResult<Json<Statistics>> {
    Ok(Json(StatisticsRepo::collect(&state.pool).await?))
}

/// GET /api/v1/admin/notifications
///
/// Synthesized on every read from pending requests and documents.
pub async fn notifications(
    State(state): State<AppState>,
    Query(params): Query<NotificationParams>,
) -> AppResult<Json<Vec<Notification>>> {
    let mut conn = state.pool.acquire().await?;
    let projects = ProjectRepo::list_by_status(&mut *conn, ProjectStatus::Requested).await?;
    let documents = DocumentRepo::list(&mut *conn, None, Some(DocumentStatus::Pending)).await?;

    let requested: Vec<RequestedProject<'_>> = projects
        .iter()
        .map(|p| RequestedProject {
            id: p.id,
            name: &p.name,
            created_at: p.created_at,
        })
        .collect();
    let pending: Vec<PendingDocument<'_>> = documents
        .iter()
        .map(|d| PendingDocument {
            id: d.id,
            project_id: d.project_id,
            title: &d.title,
            submitted_at: d.submitted_at,
            created_at: d.created_at,
        })
        .collect();

    Ok(Json(notification::build_feed(
        &requested,
        &pending,
        params.unread_only,
    )))
}

/// POST /api/v1/admin/notifications/{id}/read
///
/// Notifications are not stored, so there is nothing to mark.
pub async fn mark_notification_read(Path(id): Path<DbId>) -> StatusCode {
    tracing::debug!(notification_id = %id, "Notification read acknowledged");
    StatusCode::NO_CONTENT
}
