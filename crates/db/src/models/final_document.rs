//! Final (completion) document model.

use mosstroi_core::status::FinalDocumentStatus;
use mosstroi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `final_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalDocument {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: FinalDocumentStatus,
    pub submitted_at: Option<Timestamp>,
    pub signed_at: Option<Timestamp>,
    pub signature_url: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
