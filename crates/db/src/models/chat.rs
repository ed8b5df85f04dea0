//! Specialist chat model and list view.

use mosstroi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `chats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: DbId,
    pub project_id: DbId,
    pub specialist_name: String,
    pub specialist_avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A chat with its latest message and the number of unread specialist
/// messages.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: DbId,
    pub project_id: DbId,
    pub specialist_name: String,
    pub specialist_avatar_url: Option<String>,
    pub last_message: Option<String>,
    pub last_message_at: Option<Timestamp>,
    pub unread_count: i64,
    pub is_active: bool,
}
