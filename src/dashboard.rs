//! Dashboard State
//!
//! Explicit application state for the dashboard: the loaded records, the
//! active filters, and the load status. Views are derived from it as
//! immutable [`DashboardSnapshot`]s.

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::cmp::Ordering;

use crate::analytics::{
    daily_trend_in, score_histogram, DailyTally, DashboardFilters, DateRange, ScoreBin,
    SentimentDistribution, SentimentFilter, SentimentPercentages, BIN_COUNT,
};
use crate::client::FeedbackSource;
use crate::feedback::{FeedbackError, FeedbackRecord};

/// Message shown when feedback cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load feedback data. Please try again later.";

/// Where the dashboard is in its load cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Dashboard application state
#[derive(Debug, Clone)]
pub struct DashboardState {
    records: Vec<FeedbackRecord>,
    filters: DashboardFilters,
    status: LoadStatus,
}

impl DashboardState {
    pub fn new(filters: DashboardFilters) -> Self {
        Self {
            records: Vec::new(),
            filters,
            status: LoadStatus::Idle,
        }
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn filters(&self) -> DashboardFilters {
        self.filters
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Current error message, if the last load failed
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn set_sentiment_filter(&mut self, sentiment: SentimentFilter) {
        self.filters.sentiment = sentiment;
    }

    pub fn set_date_range(&mut self, date_range: DateRange) {
        self.filters.date_range = date_range;
    }

    /// Mark a load as started, clearing any previous error
    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Record the outcome of a load
    ///
    /// A failed load keeps whatever records were loaded before.
    pub fn finish_load(&mut self, result: Result<Vec<FeedbackRecord>, FeedbackError>) {
        match result {
            Ok(records) => {
                tracing::info!(count = records.len(), "Feedback loaded");
                self.records = records;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load feedback");
                self.status = LoadStatus::Failed(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Load records from a source
    pub async fn refresh(&mut self, source: &dyn FeedbackSource) {
        tracing::debug!(source = source.name(), "Refreshing feedback");
        self.begin_load();
        let result = source.list_feedback().await;
        self.finish_load(result);
    }

    /// Retry after a failed load
    pub async fn retry(&mut self, source: &dyn FeedbackSource) {
        self.refresh(source).await;
    }

    /// Build the render-ready view of the filtered records
    ///
    /// `now` fixes both the date-range window and the viewer time zone.
    pub fn snapshot<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        recent_limit: usize,
    ) -> DashboardSnapshot {
        let tz = now.timezone();
        let filtered = self.filters.apply(&self.records, now);

        let distribution = SentimentDistribution::from_records(filtered.iter().copied());

        DashboardSnapshot {
            filters: self.filters,
            total: filtered.len(),
            distribution,
            percentages: distribution.percentages(),
            trend: daily_trend_in(filtered.iter().copied(), &tz),
            histogram: score_histogram(filtered.iter().copied()),
            recent: recent_rows(&filtered, &tz, recent_limit),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DashboardFilters::default())
    }
}

/// Everything the dashboard shows for one filter setting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub filters: DashboardFilters,
    /// Number of records passing the filters
    pub total: usize,
    pub distribution: SentimentDistribution,
    pub percentages: SentimentPercentages,
    pub trend: Vec<DailyTally>,
    pub histogram: [ScoreBin; BIN_COUNT],
    pub recent: Vec<FeedbackRow>,
}

/// One line of the recent feedback table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRow {
    pub id: u64,
    pub date: String,
    pub text: String,
    pub sentiment: String,
    pub score: String,
}

impl FeedbackRow {
    pub fn from_record<Tz: TimeZone>(record: &FeedbackRecord, tz: &Tz) -> Self {
        Self {
            id: record.id,
            date: record.day_key_in(tz).to_string(),
            text: record.text.clone(),
            sentiment: record
                .sentiment_label
                .clone()
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            score: record
                .finite_score()
                .map(|score| format!("{:.2}", score))
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// Newest first; records with unparseable timestamps go last in input order
fn recent_rows<Tz: TimeZone>(
    records: &[&FeedbackRecord],
    tz: &Tz,
    limit: usize,
) -> Vec<FeedbackRow> {
    let mut dated: Vec<(Option<DateTime<Tz>>, &FeedbackRecord)> = records
        .iter()
        .map(|record| {
            let at = record.timestamp().and_then(|ts| ts.instant_in(tz));
            (at, *record)
        })
        .collect();

    dated.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    dated
        .into_iter()
        .take(limit)
        .map(|(_, record)| FeedbackRow::from_record(record, tz))
        .collect()
}
