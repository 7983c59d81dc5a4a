//! Feedback Sources
//!
//! Where the dashboard gets its records from:
//! - **FeedbackClient**: REST client for the feedback backend
//! - **JsonFileSource**: Read-only snapshot exported to a JSON file

mod file;
mod http;

pub use file::JsonFileSource;
pub use http::FeedbackClient;

use async_trait::async_trait;

use crate::analytics::SentimentDistribution;
use crate::feedback::{FeedbackRecord, FeedbackResult, SentimentStats};

/// Common trait for all feedback sources
#[async_trait]
pub trait FeedbackSource: Send + Sync {
    /// Short human-readable name, used in logs
    fn name(&self) -> &str;

    /// All feedback records, in the order the source returns them
    async fn list_feedback(&self) -> FeedbackResult<Vec<FeedbackRecord>>;

    /// Submit new feedback text
    ///
    /// Returns the created record when the source reports one.
    async fn submit_feedback(&self, text: &str) -> FeedbackResult<Option<FeedbackRecord>>;

    /// Look up a single record
    async fn get_feedback(&self, id: u64) -> FeedbackResult<Option<FeedbackRecord>> {
        Ok(self
            .list_feedback()
            .await?
            .into_iter()
            .find(|record| record.id == id))
    }

    /// Label statistics over every record
    async fn stats(&self) -> FeedbackResult<SentimentStats> {
        let records = self.list_feedback().await?;
        Ok(SentimentStats::from(&SentimentDistribution::from_records(
            &records,
        )))
    }
}
