//! Project stage model and DTOs.

use mosstroi_core::status::StageStatus;
use mosstroi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `project_stages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStage {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    /// Display order within the project, starting at 0.
    pub position: i32,
    #[sqlx(try_from = "String")]
    pub status: StageStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStage {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStage {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub status: Option<StageStatus>,
}

/// Body of the construction-object stage status patch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStageStatus {
    pub status: StageStatus,
}

/// Stage names are stored trimmed, so whitespace alone counts as empty.
fn validate_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
