//! Feedback error types
//!
//! Defines all errors that can occur while loading, filtering, or
//! submitting feedback.

use thiserror::Error;

/// Errors that can occur in the feedback layer
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// Submitted text failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown sentiment or date range filter
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// HTTP request failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Backend could not be reached
    #[error("Feedback service unavailable")]
    Unavailable,

    /// Backend answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source does not accept submissions
    #[error("Feedback source '{0}' is read-only")]
    ReadOnly(String),
}

impl FeedbackError {
    /// Classify a transport error the way callers care about it
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedbackError::Timeout
        } else if err.is_connect() {
            FeedbackError::Unavailable
        } else {
            FeedbackError::Request(err)
        }
    }
}

/// Result type alias for feedback operations
pub type FeedbackResult<T> = Result<T, FeedbackError>;
