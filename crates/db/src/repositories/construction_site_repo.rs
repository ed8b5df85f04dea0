//! Repository for the `construction_sites` table.

use mosstroi_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::construction_site::ConstructionSite;

const COLUMNS: &str = "id, project_id, start_date, expected_completion_date, progress, \
     all_documents_signed, is_completed, created_at, updated_at";

pub struct ConstructionSiteRepo;

impl ConstructionSiteRepo {
    /// Create the project's site unless it already has one.
    ///
    /// Returns `true` if a site was created. The unique `project_id`
    /// constraint makes this safe to repeat.
    pub async fn ensure_for_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO construction_sites (project_id, start_date)
             VALUES ($1, NOW())
             ON CONFLICT (project_id) DO NOTHING",
        )
        .bind(project_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<ConstructionSite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM construction_sites WHERE id = $1");
        sqlx::query_as::<_, ConstructionSite>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Option<ConstructionSite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM construction_sites WHERE project_id = $1");
        sqlx::query_as::<_, ConstructionSite>(&query)
            .bind(project_id)
            .fetch_optional(executor)
            .await
    }

    /// All sites, oldest first.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<ConstructionSite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM construction_sites ORDER BY created_at, id");
        sqlx::query_as::<_, ConstructionSite>(&query)
            .fetch_all(executor)
            .await
    }

    /// Returns `true` if the site exists and was updated.
    pub async fn set_progress<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        progress: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE construction_sites SET progress = $2 WHERE id = $1")
            .bind(id)
            .bind(progress)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the signed-documents flag of the site belonging to a project.
    pub async fn set_documents_signed<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        all_documents_signed: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE construction_sites SET all_documents_signed = $2 WHERE project_id = $1",
        )
        .bind(project_id)
        .bind(all_documents_signed)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark the site completed. The caller checks the completion gate first.
    pub async fn mark_completed<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE construction_sites SET is_completed = TRUE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
