//! Project entity model and DTOs.

use mosstroi_core::status::ProjectStatus;
use mosstroi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::project_stage::ProjectStage;

/// Upper bound on stage names accepted when creating a project.
pub const MAX_INITIAL_STAGES: usize = 50;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub area: f64,
    pub floors: i32,
    pub price: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub image_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project together with its stages, as returned by the read endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithStages {
    #[serde(flatten)]
    pub project: Project,
    pub stages: Vec<ProjectStage>,
}

/// DTO for creating a project from the admin panel.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub area: f64,
    #[validate(range(min = 1))]
    pub floors: i32,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub bedrooms: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub bathrooms: i32,
    #[validate(length(max = 1000))]
    pub image_url: Option<String>,
    /// Names of the stages created alongside the project, in order.
    #[serde(default)]
    #[validate(custom(function = "validate_stage_names"))]
    pub stages: Vec<String>,
}

/// DTO for updating a project. Only present fields are applied.
///
/// A `status` goes through the project transition rules before it is written.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub area: Option<f64>,
    #[validate(range(min = 1))]
    pub floors: Option<i32>,
    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,
    #[validate(length(max = 1000))]
    pub image_url: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// Body of `approve-request`. Every field is optional, so `{}` is accepted.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApproveProject {
    /// Final building address, overwriting the catalogue address.
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,
}

fn validate_stage_names(names: &Vec<String>) -> Result<(), ValidationError> {
    if names.len() > MAX_INITIAL_STAGES {
        return Err(ValidationError::new("too_many_stages"));
    }
    if names
        .iter()
        .any(|name| name.trim().is_empty() || name.chars().count() > 255)
    {
        return Err(ValidationError::new("stage_name_length"));
    }
    Ok(())
}
