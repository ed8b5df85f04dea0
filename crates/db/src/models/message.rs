//! Chat message model and DTO.

use mosstroi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: DbId,
    pub chat_id: DbId,
    pub text: String,
    pub sent_at: Timestamp,
    pub is_from_specialist: bool,
    pub is_read: bool,
}

/// DTO for posting a message. The text is trimmed by the chat rules before
/// insert; only the raw upper bound is checked here.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessage {
    #[validate(length(min = 1, max = 4000))]
    pub text: String,
    #[serde(default)]
    pub from_specialist: bool,
}
