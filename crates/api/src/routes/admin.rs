//! Route definitions for the admin panel, mounted at `/admin`.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{
    admin, completion, construction_object, construction_site, document, project, stage,
};
use crate::state::AppState;

/// ```text
/// POST   /projects                                    -> project::create
/// POST   /projects/batch-approve                      -> project::batch_approve
/// PUT    /projects/{id}                               -> project::update
/// DELETE /projects/{id}                               -> project::delete
/// POST   /projects/{id}/approve-request               -> project::approve_request
/// POST   /projects/{id}/reject-request                -> project::reject_request
/// POST   /projects/{id}/stages                        -> stage::create
/// PUT    /projects/{id}/stages/{stage_id}             -> stage::update
/// DELETE /projects/{id}/stages/{stage_id}             -> stage::delete
/// POST   /projects/{id}/documents                     -> document::create
/// POST   /projects/{id}/final-documents               -> completion::create
///
/// PATCH  /construction-sites/{site_id}/progress       -> construction_site::update_progress
/// POST   /construction-sites/{site_id}/cameras        -> construction_site::create_camera
/// PUT    /construction-sites/{site_id}/cameras/{camera_id}
/// DELETE /construction-sites/{site_id}/cameras/{camera_id}
///
/// PATCH  /construction-objects/{id}/stages/{stage_id}/status
///
/// POST   /documents/batch-approve                     -> document::batch_approve
/// POST   /documents/batch-reject                      -> document::batch_reject
///
/// GET    /statistics                                  -> admin::statistics
/// GET    /notifications                               -> admin::notifications
/// POST   /notifications/{id}/read                     -> admin::mark_notification_read
/// ```
pub fn router() -> Router<AppState> {
    let project_routes = Router::new()
        .route("/", post(project::create))
        .route("/batch-approve", post(project::batch_approve))
        .route("/{id}", put(project::update).delete(project::delete))
        .route("/{id}/approve-request", post(project::approve_request))
        .route("/{id}/reject-request", post(project::reject_request))
        .route("/{id}/stages", post(stage::create))
        .route(
            "/{id}/stages/{stage_id}",
            put(stage::update).delete(stage::delete),
        )
        .route("/{id}/documents", post(document::create))
        .route("/{id}/final-documents", post(completion::create));

    let site_routes = Router::new()
        .route(
            "/{site_id}/progress",
            patch(construction_site::update_progress),
        )
        .route(
            "/{site_id}/cameras",
            post(construction_site::create_camera),
        )
        .route(
            "/{site_id}/cameras/{camera_id}",
            put(construction_site::update_camera).delete(construction_site::delete_camera),
        );

    let object_routes = Router::new().route(
        "/{id}/stages/{stage_id}/status",
        patch(construction_object::update_stage_status),
    );

    let document_routes = Router::new()
        .route("/batch-approve", post(document::batch_approve))
        .route("/batch-reject", post(document::batch_reject));

    Router::new()
        .nest("/projects", project_routes)
        .nest("/construction-sites", site_routes)
        .nest("/construction-objects", object_routes)
        .nest("/documents", document_routes)
        .route("/statistics", get(admin::statistics))
        .route("/notifications", get(admin::notifications))
        .route(
            "/notifications/{id}/read",
            post(admin::mark_notification_read),
        )
}
