//! Repository for the `cameras` table. Cameras are always addressed through
//! their construction site.

use mosstroi_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::camera::{Camera, CreateCamera, UpdateCamera};

const COLUMNS: &str = "id, construction_site_id, name, description, stream_url, thumbnail_url, \
     is_active, created_at, updated_at";

pub struct CameraRepo;

impl CameraRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        site_id: DbId,
        input: &CreateCamera,
    ) -> Result<Camera, sqlx::Error> {
        let query = format!(
            "INSERT INTO cameras (construction_site_id, name, description, stream_url, thumbnail_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Camera>(&query)
            .bind(site_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.stream_url)
            .bind(&input.thumbnail_url)
            .fetch_one(executor)
            .await
    }

    pub async fn list_by_site<'e>(
        executor: impl PgExecutor<'e>,
        site_id: DbId,
    ) -> Result<Vec<Camera>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cameras
             WHERE construction_site_id = $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Camera>(&query)
            .bind(site_id)
            .fetch_all(executor)
            .await
    }

    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        site_id: DbId,
        camera_id: DbId,
    ) -> Result<Option<Camera>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cameras WHERE id = $2 AND construction_site_id = $1");
        sqlx::query_as::<_, Camera>(&query)
            .bind(site_id)
            .bind(camera_id)
            .fetch_optional(executor)
            .await
    }

    /// Update a camera. Only non-`None` fields in `input` are applied.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        site_id: DbId,
        camera_id: DbId,
        input: &UpdateCamera,
    ) -> Result<Option<Camera>, sqlx::Error> {
        let query = format!(
            "UPDATE cameras SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                stream_url = COALESCE($5, stream_url),
                thumbnail_url = COALESCE($6, thumbnail_url),
                is_active = COALESCE($7, is_active)
             WHERE id = $2 AND construction_site_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Camera>(&query)
            .bind(site_id)
            .bind(camera_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.stream_url)
            .bind(&input.thumbnail_url)
            .bind(input.is_active)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete<'e>(
        executor: impl PgExecutor<'e>,
        site_id: DbId,
        camera_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cameras WHERE id = $2 AND construction_site_id = $1")
            .bind(site_id)
            .bind(camera_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
