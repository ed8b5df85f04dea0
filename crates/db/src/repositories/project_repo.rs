//! Repository for the `projects` table.

use mosstroi_core::status::ProjectStatus;
use mosstroi_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, description, area, floors, price, bedrooms, \
     bathrooms, image_url, status, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in `available` status, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, address, description, area, floors, price, bedrooms, bathrooms, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.description)
            .bind(input.area)
            .bind(input.floors)
            .bind(input.price)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(&input.image_url)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id");
        sqlx::query_as::<_, Project>(&query)
            .fetch_all(executor)
            .await
    }

    /// Fetch several projects by id, in no particular order.
    pub async fn find_many<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ANY($1)");
        sqlx::query_as::<_, Project>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// List projects in the given status, most recently updated first.
    pub async fn list_by_status<'e>(
        executor: impl PgExecutor<'e>,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE status = $1 ORDER BY updated_at DESC, id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(status.as_str())
            .fetch_all(executor)
            .await
    }

    /// Of the given ids, return the projects currently in `status`.
    pub async fn find_many_in_status<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
        status: ProjectStatus,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ANY($1) AND status = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(ids)
            .bind(status.as_str())
            .fetch_all(executor)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// The status is written as given; callers check the transition first.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                description = COALESCE($4, description),
                area = COALESCE($5, area),
                floors = COALESCE($6, floors),
                price = COALESCE($7, price),
                bedrooms = COALESCE($8, bedrooms),
                bathrooms = COALESCE($9, bathrooms),
                image_url = COALESCE($10, image_url),
                status = COALESCE($11, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.description)
            .bind(input.area)
            .bind(input.floors)
            .bind(input.price)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(&input.image_url)
            .bind(input.status.map(ProjectStatus::as_str))
            .fetch_optional(executor)
            .await
    }

    /// Set the status of a single project.
    pub async fn set_status<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("UPDATE projects SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Set the status of every listed project, returning the updated rows.
    pub async fn set_status_many<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
        status: ProjectStatus,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $2 WHERE id = ANY($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(ids)
            .bind(status.as_str())
            .fetch_all(executor)
            .await
    }

    /// Delete a project and, through cascades, everything it owns.
    /// Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
