//! Chat message rules.

use crate::error::CoreError;

/// Maximum message length in characters (matches the column width).
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Trim a message body and check it is non-empty and within bounds.
pub fn normalize_text(text: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Message text cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(CoreError::Validation(format!(
            "Message text must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_text("  hello \n").unwrap(), "hello");
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(normalize_text("   \t").is_err());
        assert!(normalize_text("").is_err());
    }

    #[test]
    fn length_limit_counts_characters() {
        let cyrillic = "ж".repeat(MAX_MESSAGE_LEN);
        assert!(normalize_text(&cyrillic).is_ok());
        assert!(normalize_text(&format!("{cyrillic}ж")).is_err());
    }
}
