//! Handlers for specialist chats and their messages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mosstroi_core::chat::normalize_text;
use mosstroi_core::types::DbId;
use mosstroi_db::models::chat::ChatSummary;
use mosstroi_db::models::message::{CreateMessage, Message};
use mosstroi_db::repositories::{ChatRepo, MessageRepo};
use mosstroi_events::{ChatMessage, DomainEvent};
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::UpdatedResponse;
use crate::state::AppState;

async fn ensure_chat(conn: &mut PgConnection, id: DbId) -> AppResult<()> {
    ChatRepo::find_by_id(conn, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found("Chat", id))
}

/// GET /api/v1/chats
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ChatSummary>>> {
    Ok(Json(ChatRepo::list_summaries(&state.pool).await?))
}

/// GET /api/v1/chats/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ChatSummary>> {
    let chat = ChatRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Chat", id))?;
    Ok(Json(chat))
}

/// GET /api/v1/chats/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Message>>> {
    let mut conn = state.pool.acquire().await?;
    ensure_chat(&mut conn, id).await?;
    Ok(Json(MessageRepo::list_by_chat(&mut *conn, id).await?))
}

/// POST /api/v1/chats/{id}/messages
///
/// After the insert commits the message is announced on the event bus; the
/// real-time broadcast happens in the background and cannot fail this
/// request.
pub async fn create_message(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateMessage>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let text = normalize_text(&input.text)?;

    let mut tx = state.pool.begin().await?;
    ensure_chat(&mut tx, id).await?;
    let message = MessageRepo::create(&mut *tx, id, &text, input.from_specialist).await?;
    tx.commit().await?;

    state
        .event_bus
        .publish(DomainEvent::ChatMessageCreated(ChatMessage {
            message_id: message.id,
            chat_id: message.chat_id,
            text: message.text.clone(),
            from_specialist: message.is_from_specialist,
            is_read: message.is_read,
            sent_at: message.sent_at,
        }));

    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /api/v1/chats/{id}/messages/read
///
/// Only unread messages written by the specialist are flipped.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UpdatedResponse>> {
    let mut tx = state.pool.begin().await?;
    ensure_chat(&mut tx, id).await?;
    let updated = MessageRepo::mark_specialist_read(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::debug!(chat_id = %id, updated, "Messages marked read");
    Ok(Json(UpdatedResponse { updated }))
}
