//! Site camera model and DTOs.

use mosstroi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `cameras` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: DbId,
    pub construction_site_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub stream_url: String,
    pub thumbnail_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCamera {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub stream_url: String,
    #[validate(length(max = 1000))]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCamera {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub stream_url: Option<String>,
    #[validate(length(max = 1000))]
    pub thumbnail_url: Option<String>,
    pub is_active: Option<bool>,
}
