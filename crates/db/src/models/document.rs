//! Construction document model and DTOs.

use mosstroi_core::status::DocumentStatus;
use mosstroi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: DocumentStatus,
    pub submitted_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a document for review. Used for final documents too.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 1000))]
    pub file_url: Option<String>,
}

/// Body of every reject endpoint. The reason is normalized by the approval
/// rules, so only the upper bound is checked here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RejectReason {
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}
