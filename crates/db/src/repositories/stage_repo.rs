//! Repository for the `project_stages` table.

use mosstroi_core::status::StageStatus;
use mosstroi_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::project_stage::{ProjectStage, UpdateStage};

const COLUMNS: &str = "id, project_id, name, position, status, created_at, updated_at";

pub struct StageRepo;

impl StageRepo {
    /// Append a stage after the project's current last stage.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        name: &str,
    ) -> Result<ProjectStage, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_stages (project_id, name, position)
             SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
             FROM project_stages WHERE project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectStage>(&query)
            .bind(project_id)
            .bind(name)
            .fetch_one(executor)
            .await
    }

    /// Insert the initial stages of a freshly created project, keeping the
    /// given order.
    pub async fn create_many<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        names: &[String],
    ) -> Result<Vec<ProjectStage>, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_stages (project_id, name, position)
             SELECT $1, stage.name, (stage.ord - 1)::INTEGER
             FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS stage(name, ord)
             RETURNING {COLUMNS}"
        );
        let mut stages = sqlx::query_as::<_, ProjectStage>(&query)
            .bind(project_id)
            .bind(names)
            .fetch_all(executor)
            .await?;
        stages.sort_by_key(|s| s.position);
        Ok(stages)
    }

    pub async fn list_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<ProjectStage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_stages
             WHERE project_id = $1
             ORDER BY position, created_at"
        );
        sqlx::query_as::<_, ProjectStage>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Stages of several projects at once, ordered by project then position.
    pub async fn list_by_projects<'e>(
        executor: impl PgExecutor<'e>,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectStage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_stages
             WHERE project_id = ANY($1)
             ORDER BY project_id, position, created_at"
        );
        sqlx::query_as::<_, ProjectStage>(&query)
            .bind(project_ids)
            .fetch_all(executor)
            .await
    }

    /// Update a stage of the given project. Only non-`None` fields are applied.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        stage_id: DbId,
        input: &UpdateStage,
    ) -> Result<Option<ProjectStage>, sqlx::Error> {
        let query = format!(
            "UPDATE project_stages SET
                name = COALESCE($3, name),
                status = COALESCE($4, status)
             WHERE id = $2 AND project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectStage>(&query)
            .bind(project_id)
            .bind(stage_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.status.map(StageStatus::as_str))
            .fetch_optional(executor)
            .await
    }

    /// Returns `true` if the stage exists in the project and was updated.
    pub async fn set_status<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        stage_id: DbId,
        status: StageStatus,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE project_stages SET status = $3 WHERE id = $2 AND project_id = $1")
                .bind(project_id)
                .bind(stage_id)
                .bind(status.as_str())
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
        stage_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_stages WHERE id = $2 AND project_id = $1")
            .bind(project_id)
            .bind(stage_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
