//! Repository for the `final_documents` table.

use mosstroi_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::document::CreateDocument;
use crate::models::final_document::FinalDocument;

const COLUMNS: &str = "id, project_id, title, description, file_url, status, submitted_at, \
     signed_at, signature_url, rejection_reason, created_at, updated_at";

pub struct FinalDocumentRepo;

impl FinalDocumentRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        input: &CreateDocument,
    ) -> Result<FinalDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO final_documents (project_id, title, description, file_url, submitted_at)
             VALUES ($1, $2, $3, $4, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FinalDocument>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.file_url)
            .fetch_one(executor)
            .await
    }

    pub async fn list_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<FinalDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM final_documents
             WHERE project_id = $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, FinalDocument>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Find a final document scoped to its project.
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<FinalDocument>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM final_documents WHERE id = $2 AND project_id = $1");
        sqlx::query_as::<_, FinalDocument>(&query)
            .bind(project_id)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn sign<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<FinalDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE final_documents SET
                status = 'signed', signed_at = NOW(), rejection_reason = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FinalDocument>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Reject a final document, dropping any signature.
    pub async fn reject<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        reason: &str,
    ) -> Result<Option<FinalDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE final_documents SET
                status = 'rejected', signed_at = NULL, signature_url = NULL,
                rejection_reason = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FinalDocument>(&query)
            .bind(id)
            .bind(reason)
            .fetch_optional(executor)
            .await
    }
}
