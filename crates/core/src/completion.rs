//! Construction completion: the explicit `complete` gate on a site and the
//! read-only completion summary derived from final documents.

use crate::error::CoreError;
use crate::status::FinalDocumentStatus;
use crate::types::Timestamp;

/// Progress value at which construction counts as physically finished.
pub const FULL_PROGRESS: f64 = 1.0;

/// The site flags the completion gate looks at.
#[derive(Debug, Clone, Copy)]
pub struct SiteGate {
    pub progress: f64,
    pub all_documents_signed: bool,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// The site was already completed; nothing to write.
    AlreadyCompleted,
    /// The caller should persist `is_completed = true`.
    Completed,
}

/// Decide whether a site may be marked completed.
pub fn complete(site: SiteGate) -> Result<CompleteOutcome, CoreError> {
    if site.is_completed {
        return Ok(CompleteOutcome::AlreadyCompleted);
    }
    if !site.all_documents_signed {
        return Err(CoreError::transition(
            "All documents must be signed before completion",
        ));
    }
    if site.progress < FULL_PROGRESS {
        return Err(CoreError::transition(
            "Construction progress must be 100% to complete",
        ));
    }
    Ok(CompleteOutcome::Completed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionSummary {
    pub is_completed: bool,
    pub completion_date: Option<Timestamp>,
}

/// Derive the completion summary of a project.
///
/// Completed iff progress is full, at least one final document exists, and
/// every final document that was not rejected is signed. The completion date
/// is the latest signing time, reported only once completed.
pub fn summarize<I>(progress: f64, documents: I) -> CompletionSummary
where
    I: IntoIterator<Item = (FinalDocumentStatus, Option<Timestamp>)>,
{
    let not_completed = CompletionSummary {
        is_completed: false,
        completion_date: None,
    };
    if progress < FULL_PROGRESS {
        return not_completed;
    }

    let mut any = false;
    let mut latest: Option<Timestamp> = None;
    for (status, signed_at) in documents {
        any = true;
        match status {
            FinalDocumentStatus::Rejected => {}
            FinalDocumentStatus::Pending => return not_completed,
            FinalDocumentStatus::Signed => {
                if let Some(at) = signed_at {
                    latest = Some(latest.map_or(at, |cur| cur.max(at)));
                }
            }
        }
    }

    if !any {
        return not_completed;
    }
    CompletionSummary {
        is_completed: true,
        completion_date: latest,
    }
}
