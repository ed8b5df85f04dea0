//! Review decisions for construction documents and completion documents.
//!
//! Approval (signing) and rejection are terminal: once a document has been
//! decided either way, neither decision can be applied again.

use crate::error::CoreError;
use crate::status::{DocumentStatus, FinalDocumentStatus};

/// Maximum stored length of a rejection reason (matches the column width).
pub const MAX_REASON_LEN: usize = 1000;

pub fn approve_document(current: DocumentStatus) -> Result<DocumentStatus, CoreError> {
    match current {
        DocumentStatus::Approved => Err(CoreError::transition("Document is already approved")),
        DocumentStatus::Rejected => Err(CoreError::transition(
            "Cannot approve a rejected document",
        )),
        DocumentStatus::Pending | DocumentStatus::UnderReview => Ok(DocumentStatus::Approved),
    }
}

pub fn reject_document(current: DocumentStatus) -> Result<DocumentStatus, CoreError> {
    match current {
        DocumentStatus::Approved => Err(CoreError::transition(
            "Cannot reject an approved document",
        )),
        DocumentStatus::Rejected => Err(CoreError::transition("Document is already rejected")),
        DocumentStatus::Pending | DocumentStatus::UnderReview => Ok(DocumentStatus::Rejected),
    }
}

pub fn sign_final_document(
    current: FinalDocumentStatus,
) -> Result<FinalDocumentStatus, CoreError> {
    match current {
        FinalDocumentStatus::Signed => Err(CoreError::transition("Document is already signed")),
        FinalDocumentStatus::Rejected => {
            Err(CoreError::transition("Cannot sign a rejected document"))
        }
        FinalDocumentStatus::Pending => Ok(FinalDocumentStatus::Signed),
    }
}

pub fn reject_final_document(
    current: FinalDocumentStatus,
) -> Result<FinalDocumentStatus, CoreError> {
    match current {
        FinalDocumentStatus::Signed => {
            Err(CoreError::transition("Cannot reject a signed document"))
        }
        FinalDocumentStatus::Rejected => {
            Err(CoreError::transition("Document is already rejected"))
        }
        FinalDocumentStatus::Pending => Ok(FinalDocumentStatus::Rejected),
    }
}

/// Normalize a rejection reason: trimmed, non-empty, bounded.
pub fn require_reason(reason: &str) -> Result<String, CoreError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "A rejection reason is required".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_REASON_LEN {
        return Err(CoreError::Validation(format!(
            "Rejection reason must be at most {MAX_REASON_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
