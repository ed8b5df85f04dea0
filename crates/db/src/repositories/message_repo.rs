//! Repository for the `messages` table. Messages are append-only.

use mosstroi_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::message::Message;

const COLUMNS: &str = "id, chat_id, text, sent_at, is_from_specialist, is_read";

pub struct MessageRepo;

impl MessageRepo {
    /// Append a message; `text` is expected to be normalized already.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        chat_id: DbId,
        text: &str,
        is_from_specialist: bool,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (chat_id, text, is_from_specialist)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(chat_id)
            .bind(text)
            .bind(is_from_specialist)
            .fetch_one(executor)
            .await
    }

    /// The conversation in the order it was sent.
    pub async fn list_by_chat<'e>(
        executor: impl PgExecutor<'e>,
        chat_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE chat_id = $1
             ORDER BY sent_at, created_at"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(chat_id)
            .fetch_all(executor)
            .await
    }

    /// Mark the chat's unread specialist messages as read. Messages written
    /// by the client are left alone. Returns the number of messages flipped.
    pub async fn mark_specialist_read<'e>(
        executor: impl PgExecutor<'e>,
        chat_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE
             WHERE chat_id = $1 AND is_from_specialist AND NOT is_read",
        )
        .bind(chat_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
