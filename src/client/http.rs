//! Feedback REST API Client
//!
//! HTTP client for the feedback backend's `/feedback` endpoints.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::FeedbackSource;
use crate::config::ApiConfig;
use crate::feedback::{
    validate_submission, FeedbackError, FeedbackRecord, FeedbackResult, SentimentStats,
};

/// Feedback backend REST client
///
/// Every call is a single request/response: no retries, no cancellation.
pub struct FeedbackClient {
    client: Client,
    base_url: String,
}

impl FeedbackClient {
    /// Create a client for the given base URL (e.g. "http://localhost:8080/api")
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> FeedbackResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(config: &ApiConfig) -> FeedbackResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request, mapping transport failures and non-2xx statuses
    async fn send(&self, request: RequestBuilder) -> FeedbackResult<Response> {
        let response = request.send().await.map_err(FeedbackError::from_transport)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            Err(FeedbackError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> FeedbackResult<T> {
        let body = response.text().await.map_err(FeedbackError::from_transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FeedbackSource for FeedbackClient {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn list_feedback(&self) -> FeedbackResult<Vec<FeedbackRecord>> {
        let response = self.send(self.client.get(self.endpoint("feedback"))).await?;
        let records: Vec<FeedbackRecord> = Self::read_json(response).await?;

        tracing::debug!(count = records.len(), "Fetched feedback list");
        Ok(records)
    }

    async fn submit_feedback(&self, text: &str) -> FeedbackResult<Option<FeedbackRecord>> {
        let body = validate_submission(text)?;

        let response = self
            .send(self.client.post(self.endpoint("feedback")).json(&body))
            .await?;

        // The response body is not guaranteed to be a record
        let raw = response.text().await.map_err(FeedbackError::from_transport)?;
        let created = serde_json::from_str::<FeedbackRecord>(&raw).ok();

        match &created {
            Some(record) => tracing::info!(
                id = record.id,
                label = record.sentiment_label.as_deref().unwrap_or("none"),
                "Feedback submitted"
            ),
            None => tracing::info!("Feedback submitted"),
        }

        Ok(created)
    }

    async fn get_feedback(&self, id: u64) -> FeedbackResult<Option<FeedbackRecord>> {
        let url = self.endpoint(&format!("feedback/{}", id));

        match self.send(self.client.get(url)).await {
            Ok(response) => Ok(Some(Self::read_json(response).await?)),
            Err(FeedbackError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn stats(&self) -> FeedbackResult<SentimentStats> {
        let response = self
            .send(self.client.get(self.endpoint("feedback/stats")))
            .await?;
        Self::read_json(response).await
    }
}
