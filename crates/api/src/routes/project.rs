//! Route definitions for the public `/projects` resource, including the
//! project-scoped completion documents.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{completion, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                       -> list
/// GET    /{id}                                   -> get_by_id
/// POST   /{id}/request                           -> request_construction
/// GET    /{id}/completion-status                 -> completion_status
/// GET    /{id}/final-documents                   -> list
/// GET    /{id}/final-documents/{doc_id}          -> get_by_id
/// POST   /{id}/final-documents/{doc_id}/sign     -> sign
/// POST   /{id}/final-documents/{doc_id}/reject   -> reject
/// ```
pub fn router() -> Router<AppState> {
    let final_document_routes = Router::new()
        .route("/", get(completion::list))
        .route("/{doc_id}", get(completion::get_by_id))
        .route("/{doc_id}/sign", post(completion::sign))
        .route("/{doc_id}/reject", post(completion::reject));

    Router::new()
        .route("/", get(project::list))
        .route("/{id}", get(project::get_by_id))
        .route("/{id}/request", post(project::request_construction))
        .route("/{id}/completion-status", get(completion::completion_status))
        .nest("/{id}/final-documents", final_document_routes)
}
