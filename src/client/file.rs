//! JSON snapshot source
//!
//! Reads a `GET /feedback` response saved to disk, for offline dashboards.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::FeedbackSource;
use crate::feedback::{FeedbackError, FeedbackRecord, FeedbackResult};

/// Read-only feedback source backed by a JSON array on disk
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl FeedbackSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_feedback(&self) -> FeedbackResult<Vec<FeedbackRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<FeedbackRecord> = serde_json::from_str(&content)?;

        tracing::debug!(path = %self.name, count = records.len(), "Loaded feedback snapshot");
        Ok(records)
    }

    async fn submit_feedback(&self, _text: &str) -> FeedbackResult<Option<FeedbackRecord>> {
        Err(FeedbackError::ReadOnly(self.name.clone()))
    }
}
