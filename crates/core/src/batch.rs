//! All-or-nothing batch selection helpers.

use crate::error::CoreError;
use crate::types::DbId;

/// Upper bound on ids accepted by one batch request.
pub const MAX_BATCH_SIZE: usize = 500;

/// Deduplicate batch ids, keeping first-seen order.
pub fn normalize_ids(ids: &[DbId]) -> Result<Vec<DbId>, CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("ids must not be empty".to_string()));
    }
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    if unique.len() > MAX_BATCH_SIZE {
        return Err(CoreError::Validation(format!(
            "At most {MAX_BATCH_SIZE} ids can be processed at once"
        )));
    }
    Ok(unique)
}

/// Refuse the whole batch unless every requested id was eligible.
pub fn ensure_complete(
    requested: usize,
    eligible: usize,
    description: &str,
) -> Result<(), CoreError> {
    if requested == eligible {
        Ok(())
    } else {
        Err(CoreError::transition(format!(
            "Some {description} ({} of {requested})",
            requested - eligible.min(requested)
        )))
    }
}
