//! Construction site model, its read views and DTOs.

use mosstroi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::camera::Camera;
use crate::models::project_stage::ProjectStage;

/// A row from the `construction_sites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionSite {
    pub id: DbId,
    pub project_id: DbId,
    pub start_date: Option<Timestamp>,
    pub expected_completion_date: Option<Timestamp>,
    pub progress: f64,
    pub all_documents_signed: bool,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Site page: the site with its project name, address and cameras.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionSiteView {
    pub id: DbId,
    pub project_id: DbId,
    pub project_name: String,
    pub address: String,
    pub cameras: Vec<Camera>,
    pub start_date: Option<Timestamp>,
    pub expected_completion_date: Option<Timestamp>,
    pub progress: f64,
}

/// The mobile app's view of a building under construction: the site joined
/// with its project, stages and active specialist chat.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionObject {
    /// The construction site id.
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub address: String,
    pub description: String,
    pub area: f64,
    pub floors: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
    pub image_url: Option<String>,
    pub stages: Vec<ProjectStage>,
    pub chat_id: Option<DbId>,
    pub progress: f64,
    pub all_documents_signed: bool,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProgress {
    #[validate(range(min = 0.0, max = 1.0))]
    pub progress: f64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentsStatus {
    pub all_documents_signed: bool,
}
