//! Route definitions for the public `/construction-sites` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::construction_site;
use crate::state::AppState;

/// ```text
/// GET /project/{project_id}                -> get_by_project
/// GET /{site_id}/cameras                   -> list_cameras
/// GET /{site_id}/cameras/{camera_id}       -> get_camera
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/project/{project_id}",
            get(construction_site::get_by_project),
        )
        .route("/{site_id}/cameras", get(construction_site::list_cameras))
        .route(
            "/{site_id}/cameras/{camera_id}",
            get(construction_site::get_camera),
        )
}
