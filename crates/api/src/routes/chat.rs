//! Route definitions for `/chats`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// ```text
/// GET  /                      -> list
/// GET  /{id}                  -> get_by_id
/// GET  /{id}/messages         -> list_messages
/// POST /{id}/messages         -> create_message
/// POST /{id}/messages/read    -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::list))
        .route("/{id}", get(chat::get_by_id))
        .route(
            "/{id}/messages",
            get(chat::list_messages).post(chat::create_message),
        )
        .route("/{id}/messages/read", post(chat::mark_read))
}
