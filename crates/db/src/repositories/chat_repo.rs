//! Repository for the `chats` table.

use mosstroi_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::chat::{Chat, ChatSummary};

const COLUMNS: &str =
    "id, project_id, specialist_name, specialist_avatar_url, is_active, created_at, updated_at";

/// Chat columns plus the latest message and the unread specialist count.
const SUMMARY_SELECT: &str = "SELECT c.id, c.project_id, c.specialist_name, c.specialist_avatar_url,
        last.text AS last_message, last.sent_at AS last_message_at,
        (SELECT COUNT(*) FROM messages u
          WHERE u.chat_id = c.id AND u.is_from_specialist AND NOT u.is_read) AS unread_count,
        c.is_active
     FROM chats c
     LEFT JOIN LATERAL (
        SELECT m.text, m.sent_at FROM messages m
        WHERE m.chat_id = c.id
        ORDER BY m.sent_at DESC, m.created_at DESC
        LIMIT 1
     ) last ON TRUE";

pub struct ChatRepo;

impl ChatRepo {
    /// Give the project an active chat unless it already has one.
    ///
    /// Returns `true` if a chat was created. The partial unique index on
    /// active chats makes this safe to repeat.
    pub async fn ensure_active_for_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        specialist_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO chats (project_id, specialist_name, is_active)
             VALUES ($1, $2, TRUE)
             ON CONFLICT (project_id) WHERE is_active DO NOTHING",
        )
        .bind(project_id)
        .bind(specialist_name)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE id = $1");
        sqlx::query_as::<_, Chat>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_active_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chats WHERE project_id = $1 AND is_active");
        sqlx::query_as::<_, Chat>(&query)
            .bind(project_id)
            .fetch_optional(executor)
            .await
    }

    /// Active chats of several projects at once.
    pub async fn list_active_by_projects<'e>(
        executor: impl PgExecutor<'e>,
        project_ids: &[DbId],
    ) -> Result<Vec<Chat>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM chats WHERE project_id = ANY($1) AND is_active");
        sqlx::query_as::<_, Chat>(&query)
            .bind(project_ids)
            .fetch_all(executor)
            .await
    }

    /// Active chats, the most recent conversation first. Chats without
    /// messages come last.
    pub async fn list_summaries<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<ChatSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE c.is_active
             ORDER BY last.sent_at DESC NULLS LAST, c.created_at DESC"
        );
        sqlx::query_as::<_, ChatSummary>(&query)
            .fetch_all(executor)
            .await
    }

    pub async fn find_summary<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<ChatSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, ChatSummary>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
