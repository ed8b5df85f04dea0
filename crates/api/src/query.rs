//! Query string parameters shared by list endpoints.

use mosstroi_core::status::DocumentStatus;
use mosstroi_core::types::DbId;
use serde::Deserialize;

/// `GET /documents?projectId=&status=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListParams {
    pub project_id: Option<DbId>,
    pub status: Option<DocumentStatus>,
}

/// `GET /admin/notifications?unreadOnly=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationParams {
    #[serde(default)]
    pub unread_only: bool,
}
