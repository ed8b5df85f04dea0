//! Route definitions for `/construction-objects`, the mobile app's combined
//! view of a project under construction.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::construction_object;
use crate::state::AppState;

/// ```text
/// GET   /                                         -> list
/// GET   /{id}                                     -> get_by_id
/// POST  /{id}/complete                            -> complete
/// PATCH /by-project/{project_id}/documents-status -> update_documents_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(construction_object::list))
        .route("/{id}", get(construction_object::get_by_id))
        .route("/{id}/complete", post(construction_object::complete))
        .route(
            "/by-project/{project_id}/documents-status",
            patch(construction_object::update_documents_status),
        )
}
