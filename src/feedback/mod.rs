//! Feedback Records
//!
//! Types describing user-submitted feedback and its sentiment metadata,
//! plus the validation applied before a submission is sent.
//!
//! ## Components
//!
//! - **FeedbackRecord**: One entry as served by `GET /feedback`
//! - **SentimentLabel**: positive / neutral / negative
//! - **DayKey**: Calendar day (or malformed raw timestamp) used for grouping
//! - **validate_submission**: Length and blank checks for `POST /feedback`

mod error;
mod types;
mod validate;

pub use error::{FeedbackError, FeedbackResult};
pub use types::{
    DayKey, FeedbackRecord, NewFeedback, ParsedTimestamp, SentimentLabel, SentimentStats,
};
pub use validate::{validate_submission, MAX_TEXT_CHARS, MIN_TEXT_CHARS};
