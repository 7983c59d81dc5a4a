//! Submission validation
//!
//! Feedback text is checked before it ever reaches the network, using
//! the same limits the backend enforces.

use super::error::{FeedbackError, FeedbackResult};
use super::types::NewFeedback;

/// Minimum feedback length in characters
pub const MIN_TEXT_CHARS: usize = 3;

/// Maximum feedback length in characters
pub const MAX_TEXT_CHARS: usize = 1000;

/// Validate feedback text and build the request body
///
/// Surrounding whitespace is trimmed before the length check.
pub fn validate_submission(text: &str) -> FeedbackResult<NewFeedback> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(FeedbackError::Validation(
            "Feedback text cannot be empty".to_string(),
        ));
    }

    let chars = trimmed.chars().count();
    if !(MIN_TEXT_CHARS..=MAX_TEXT_CHARS).contains(&chars) {
        return Err(FeedbackError::Validation(format!(
            "Feedback must be between {} and {} characters (got {})",
            MIN_TEXT_CHARS, MAX_TEXT_CHARS, chars
        )));
    }

    Ok(NewFeedback {
        text: trimmed.to_string(),
    })
}
