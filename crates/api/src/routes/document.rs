//! Route definitions for the public `/documents` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// ```text
/// GET    /               -> list (?projectId, ?status)
/// GET    /{id}           -> get_by_id
/// POST   /{id}/approve   -> approve
/// POST   /{id}/reject    -> reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(document::list))
        .route("/{id}", get(document::get_by_id))
        .route("/{id}/approve", post(document::approve))
        .route("/{id}/reject", post(document::reject))
}
