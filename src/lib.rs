//! # Sentiment Dashboard
//!
//! Collect free-text feedback and see how people feel about it: sentiment
//! distribution, daily trend, and score histogram.
//!
//! ## Features
//!
//! - **Daily trend**: label counts per calendar day in the viewer's time zone
//! - **Score histogram**: five fixed bins over [0, 1]
//! - **Distribution**: per-label counts and display percentages
//! - **Filters**: by sentiment and by date range (today, week, month)
//! - **Sources**: REST backend client or an offline JSON snapshot
//!
//! ## Modules
//!
//! - [`feedback`]: Record types, timestamp parsing, submission validation
//! - [`analytics`]: Pure aggregation over feedback records
//! - [`client`]: Feedback sources (HTTP and file)
//! - [`dashboard`]: Explicit dashboard state and snapshots
//! - [`render`]: Pluggable chart renderers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Local;
//! use sentiment_dashboard::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedbackClient::new("http://localhost:8080/api", Duration::from_secs(30))?;
//!
//!     // Submit feedback
//!     client.submit_feedback("The new release is much faster").await?;
//!
//!     // Load and summarise last week's feedback
//!     let mut state = DashboardState::new(DashboardFilters::new(
//!         SentimentFilter::All,
//!         DateRange::Week,
//!     ));
//!     state.refresh(&client).await;
//!
//!     let snapshot = state.snapshot(&Local::now(), 10);
//!     println!(
//!         "{} feedback entries, {}% positive",
//!         snapshot.total, snapshot.percentages.positive
//!     );
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod feedback;
pub mod logging;
pub mod render;

// Re-export top-level types for convenience
pub use feedback::{
    validate_submission, DayKey, FeedbackError, FeedbackRecord, FeedbackResult, NewFeedback,
    ParsedTimestamp, SentimentLabel, SentimentStats,
};

pub use analytics::{
    bin_index, daily_trend, daily_trend_in, percentage, score_histogram, DailyTally,
    DashboardFilters, DateRange, ScoreBin, SentimentDistribution, SentimentFilter,
    SentimentPercentages, SCORE_RANGES,
};

pub use client::{FeedbackClient, FeedbackSource, JsonFileSource};

pub use dashboard::{DashboardSnapshot, DashboardState, FeedbackRow, LoadStatus};

pub use render::{snapshot_json, ChartRenderer, CsvRenderer, RenderError, TextRenderer};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, LoggingConfig};
