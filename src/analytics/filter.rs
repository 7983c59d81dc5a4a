//! Dashboard filters
//!
//! Sentiment and date-range filters applied to the loaded feedback before
//! any aggregation runs.

use chrono::{DateTime, Duration, Months, TimeZone};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::feedback::{FeedbackError, FeedbackRecord, SentimentLabel};

/// Which sentiment labels to keep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SentimentFilter {
    #[default]
    All,
    Only(SentimentLabel),
}

impl SentimentFilter {
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::Only(label) => record.sentiment() == Some(*label),
        }
    }
}

impl fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentFilter::All => f.write_str("all"),
            SentimentFilter::Only(label) => write!(f, "{}", label),
        }
    }
}

impl FromStr for SentimentFilter {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SentimentFilter::All);
        }
        s.parse::<SentimentLabel>()
            .map(SentimentFilter::Only)
            .map_err(|_| {
                FeedbackError::InvalidFilter(format!(
                    "sentiment must be one of all, positive, neutral, negative (got '{}')",
                    s
                ))
            })
    }
}

impl TryFrom<String> for SentimentFilter {
    type Error = FeedbackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for SentimentFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How far back to look, relative to "now"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum DateRange {
    #[default]
    All,
    /// Since local midnight
    Today,
    /// Last 7 days
    Week,
    /// Last calendar month
    Month,
}

impl DateRange {
    /// Earliest instant included, or `None` for an unbounded range
    pub fn start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match self {
            DateRange::All => None,
            DateRange::Today => {
                let midnight = now.date_naive().and_hms_opt(0, 0, 0)?;
                now.timezone().from_local_datetime(&midnight).earliest()
            }
            DateRange::Week => Some(now.clone() - Duration::days(7)),
            DateRange::Month => now
                .clone()
                .checked_sub_months(Months::new(1))
                .or_else(|| Some(now.clone() - Duration::days(30))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::All => "All Time",
            DateRange::Today => "Today",
            DateRange::Week => "Last 7 Days",
            DateRange::Month => "Last 30 Days",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
        };
        f.write_str(s)
    }
}

impl FromStr for DateRange {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            _ => Err(FeedbackError::InvalidFilter(format!(
                "date range must be one of all, today, week, month (got '{}')",
                s
            ))),
        }
    }
}

impl TryFrom<String> for DateRange {
    type Error = FeedbackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Combined filter state of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilters {
    #[serde(default)]
    pub sentiment: SentimentFilter,
    #[serde(default)]
    pub date_range: DateRange,
}

impl DashboardFilters {
    pub fn new(sentiment: SentimentFilter, date_range: DateRange) -> Self {
        Self {
            sentiment,
            date_range,
        }
    }

    /// Records passing both filters, in input order
    ///
    /// Under any bounded date range, records whose timestamp cannot be
    /// parsed are excluded.
    pub fn apply<'a, Tz: TimeZone>(
        &self,
        records: &'a [FeedbackRecord],
        now: &DateTime<Tz>,
    ) -> Vec<&'a FeedbackRecord> {
        let tz = now.timezone();
        let start = self.date_range.start(now);

        records
            .iter()
            .filter(|record| self.sentiment.matches(record))
            .filter(|record| match &start {
                None => true,
                Some(start) => record
                    .timestamp()
                    .and_then(|ts| ts.instant_in(&tz))
                    .map_or(false, |at| at >= *start),
            })
            .collect()
    }
}
