//! Admin dashboard statistics.

use serde::Serialize;
use sqlx::FromRow;

/// Aggregates over projects and documents, computed in a single query.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_projects: i64,
    pub available_projects: i64,
    pub requested_projects: i64,
    pub in_progress_projects: i64,
    pub total_documents: i64,
    pub pending_documents: i64,
    pub approved_documents: i64,
    pub rejected_documents: i64,
    /// Sum of prices of projects under construction.
    pub total_revenue: f64,
    pub average_project_price: f64,
}
