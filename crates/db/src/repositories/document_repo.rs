//! Repository for the `documents` table.
//!
//! Decision updates keep the row self-consistent: approving sets
//! `approved_at` and clears the reason, rejecting does the opposite.

use mosstroi_core::status::DocumentStatus;
use mosstroi_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::document::{CreateDocument, Document};

const COLUMNS: &str = "id, project_id, title, description, file_url, status, submitted_at, \
     approved_at, rejection_reason, created_at, updated_at";

pub struct DocumentRepo;

impl DocumentRepo {
    /// Submit a document for review; `submitted_at` is now.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (project_id, title, description, file_url, submitted_at)
             VALUES ($1, $2, $3, $4, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.file_url)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List documents, optionally narrowed to one project and/or status.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        project_id: Option<DbId>,
        status: Option<DocumentStatus>,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE ($1::UUID IS NULL OR project_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(project_id)
            .bind(status.map(DocumentStatus::as_str))
            .fetch_all(executor)
            .await
    }

    /// Of the given ids, return the documents currently in `status`.
    pub async fn find_many_in_status<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
        status: DocumentStatus,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = ANY($1) AND status = $2");
        sqlx::query_as::<_, Document>(&query)
            .bind(ids)
            .bind(status.as_str())
            .fetch_all(executor)
            .await
    }

    pub async fn approve<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                status = 'approved', approved_at = NOW(), rejection_reason = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn reject<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        reason: &str,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                status = 'rejected', approved_at = NULL, rejection_reason = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(reason)
            .fetch_optional(executor)
            .await
    }

    /// Approve every listed document. Returns the number of rows updated.
    pub async fn approve_many<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE documents SET
                status = 'approved', approved_at = NOW(), rejection_reason = NULL
             WHERE id = ANY($1)",
        )
        .bind(ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Reject every listed document with the same reason.
    pub async fn reject_many<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
        reason: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE documents SET
                status = 'rejected', approved_at = NULL, rejection_reason = $2
             WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(reason)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
