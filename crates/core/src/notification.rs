//! Admin notification feed.
//!
//! Notifications are not stored. The feed is synthesized on every read from
//! projects awaiting a construction decision and documents awaiting review,
//! so every entry is unread and "mark as read" has nothing to update.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Maximum number of entries returned by one feed read.
pub const FEED_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewRequest,
    NewDocument,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Id of the source entity; stable across reads.
    pub id: DbId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub project_id: Option<DbId>,
    pub document_id: Option<DbId>,
    pub chat_id: Option<DbId>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A project in `requested` status.
#[derive(Debug, Clone)]
pub struct RequestedProject<'a> {
    pub id: DbId,
    pub name: &'a str,
    pub created_at: Timestamp,
}

/// A document in `pending` status.
#[derive(Debug, Clone)]
pub struct PendingDocument<'a> {
    pub id: DbId,
    pub project_id: DbId,
    pub title: &'a str,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&RequestedProject<'_>> for Notification {
    fn from(project: &RequestedProject<'_>) -> Self {
        Self {
            id: project.id,
            kind: NotificationKind::NewRequest,
            title: "New construction request".to_string(),
            message: format!("Project '{}' was requested for construction", project.name),
            project_id: Some(project.id),
            document_id: None,
            chat_id: None,
            is_read: false,
            created_at: project.created_at,
        }
    }
}

impl From<&PendingDocument<'_>> for Notification {
    fn from(document: &PendingDocument<'_>) -> Self {
        Self {
            id: document.id,
            kind: NotificationKind::NewDocument,
            title: "New document for review".to_string(),
            message: format!("Document '{}' requires approval", document.title),
            project_id: Some(document.project_id),
            document_id: Some(document.id),
            chat_id: None,
            is_read: false,
            created_at: document.submitted_at.unwrap_or(document.created_at),
        }
    }
}

/// Build the feed: newest first, capped at [`FEED_LIMIT`].
pub fn build_feed(
    projects: &[RequestedProject<'_>],
    documents: &[PendingDocument<'_>],
    unread_only: bool,
) -> Vec<Notification> {
    let mut feed: Vec<Notification> = projects
        .iter()
        .map(Notification::from)
        .chain(documents.iter().map(Notification::from))
        .filter(|n| !unread_only || !n.is_read)
        .collect();

    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    feed.truncate(FEED_LIMIT);
    feed
}
