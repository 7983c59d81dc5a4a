//! Core data types for feedback records
//!
//! This module defines the types shared by every layer of the dashboard:
//! - `FeedbackRecord`: A single submitted feedback entry with sentiment metadata
//! - `SentimentLabel`: The three recognised sentiment classes
//! - `ParsedTimestamp` and `DayKey`: How `createdAt` maps onto calendar days
//! - `SentimentStats`: Server-side label statistics

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::FeedbackError;

/// A single feedback entry as returned by the backend
///
/// Records are read-only inputs to every aggregation; nothing in this
/// crate mutates one after it has been loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Backend-assigned identifier
    pub id: u64,
    /// Free-form text submitted by the user
    pub text: String,
    /// Creation timestamp, usually ISO 8601
    #[serde(default)]
    pub created_at: String,
    /// Raw sentiment label, kept as-is so unknown labels survive loading
    #[serde(default)]
    pub sentiment_label: Option<String>,
    /// Sentiment score, nominally in [0, 1]
    #[serde(default)]
    pub sentiment_score: Option<f64>,
}

impl FeedbackRecord {
    /// Create a record without sentiment metadata
    pub fn new(id: u64, text: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            created_at: created_at.into(),
            sentiment_label: None,
            sentiment_score: None,
        }
    }

    /// Builder method: set the sentiment label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.sentiment_label = Some(label.into());
        self
    }

    /// Builder method: set the sentiment score
    pub fn score(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score);
        self
    }

    /// The recognised sentiment label, if any
    pub fn sentiment(&self) -> Option<SentimentLabel> {
        self.sentiment_label
            .as_deref()
            .and_then(|label| label.parse().ok())
    }

    /// The sentiment score if present and finite
    pub fn finite_score(&self) -> Option<f64> {
        self.sentiment_score.filter(|score| score.is_finite())
    }

    /// Parse `created_at`, returning `None` for malformed timestamps
    pub fn timestamp(&self) -> Option<ParsedTimestamp> {
        ParsedTimestamp::parse(&self.created_at)
    }

    /// Calendar day this record falls on in the given time zone
    pub fn day_key_in<Tz: TimeZone>(&self, tz: &Tz) -> DayKey {
        match self.timestamp() {
            Some(ts) => DayKey::Date(ts.day_in(tz)),
            None => {
                tracing::debug!(
                    id = self.id,
                    created_at = %self.created_at,
                    "Unparseable createdAt, grouping under raw value"
                );
                DayKey::Unparsed(self.created_at.trim().to_string())
            }
        }
    }
}

/// Sentiment class assigned by the analysis backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in display order
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = FeedbackError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            other => Err(FeedbackError::InvalidFilter(format!(
                "unknown sentiment label '{}'",
                other
            ))),
        }
    }
}

/// A successfully parsed `createdAt` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    /// Absolute instant carrying its own offset (RFC 3339)
    Instant(DateTime<FixedOffset>),
    /// Wall-clock date-time without offset, taken as viewer-local
    Local(NaiveDateTime),
    /// Bare calendar date
    Date(NaiveDate),
}

impl ParsedTimestamp {
    /// Parse the timestamp formats the backend is known to emit
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(ParsedTimestamp::Instant(dt));
        }

        const NAIVE_FORMATS: [&str; 4] = [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ];

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(ParsedTimestamp::Local(naive));
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(ParsedTimestamp::Date)
    }

    /// Calendar day in the given time zone
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        match self {
            ParsedTimestamp::Instant(dt) => dt.with_timezone(tz).date_naive(),
            ParsedTimestamp::Local(naive) => naive.date(),
            ParsedTimestamp::Date(date) => *date,
        }
    }

    /// Resolve to an instant in the given time zone
    ///
    /// Returns `None` only for local times skipped by a DST transition.
    pub fn instant_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match self {
            ParsedTimestamp::Instant(dt) => Some(dt.with_timezone(tz)),
            ParsedTimestamp::Local(naive) => tz.from_local_datetime(naive).earliest(),
            ParsedTimestamp::Date(date) => {
                let midnight = date.and_hms_opt(0, 0, 0)?;
                tz.from_local_datetime(&midnight).earliest()
            }
        }
    }
}

/// Grouping key for the daily trend
///
/// Every `Date` orders before every `Unparsed`, so malformed timestamps
/// trail the real calendar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayKey {
    Date(NaiveDate),
    Unparsed(String),
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayKey::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DayKey::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Request body for `POST /feedback`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewFeedback {
    pub text: String,
}

/// Label statistics as reported by `GET /feedback/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SentimentStats {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
    #[serde(default)]
    pub total: u64,
    /// Unrounded percentages, only present when `total > 0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_percentage: Option<f64>,
}

impl SentimentStats {
    /// Build stats from raw counts, computing percentages when there is data
    pub fn from_counts(positive: u64, neutral: u64, negative: u64, total: u64) -> Self {
        let share = |count: u64| {
            (total > 0).then(|| count as f64 / total as f64 * 100.0)
        };

        Self {
            positive,
            neutral,
            negative,
            total,
            positive_percentage: share(positive),
            neutral_percentage: share(neutral),
            negative_percentage: share(negative),
        }
    }

    /// Count for one label
    pub fn count(&self, label: SentimentLabel) -> u64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "text": "Great service",
            "createdAt": "2024-03-01T10:15:30",
            "sentimentLabel": "positive",
            "sentimentScore": 0.92
        }"#;

        let record: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.sentiment(), Some(SentimentLabel::Positive));
        assert_eq!(record.finite_score(), Some(0.92));
    }

    #[test]
    fn test_record_tolerates_missing_sentiment() {
        let json = r#"{"id": 1, "text": "hmm", "createdAt": "2024-03-01", "sentimentLabel": null}"#;
        let record: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sentiment(), None);
        assert_eq!(record.sentiment_score, None);
    }

    #[test]
    fn test_unknown_label_is_not_recognised() {
        let record = FeedbackRecord::new(1, "x", "2024-03-01").label("mixed");
        assert_eq!(record.sentiment(), None);
        assert_eq!(record.sentiment_label.as_deref(), Some("mixed"));
    }

    #[test]
    fn test_label_parsing_is_case_insensitive() {
        assert_eq!("POSITIVE".parse::<SentimentLabel>().unwrap(), SentimentLabel::Positive);
        assert_eq!(" neutral ".parse::<SentimentLabel>().unwrap(), SentimentLabel::Neutral);
        assert!("meh".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn test_non_finite_score_is_ignored() {
        let record = FeedbackRecord::new(1, "x", "2024-03-01").score(f64::NAN);
        assert_eq!(record.finite_score(), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(matches!(
            ParsedTimestamp::parse("2024-03-01T23:30:00Z"),
            Some(ParsedTimestamp::Instant(_))
        ));
        assert!(matches!(
            ParsedTimestamp::parse("2024-03-01T23:30:00.123456"),
            Some(ParsedTimestamp::Local(_))
        ));
        assert!(matches!(
            ParsedTimestamp::parse("2024-03-01 08:00:00"),
            Some(ParsedTimestamp::Local(_))
        ));
        assert!(matches!(
            ParsedTimestamp::parse("2024-03-01"),
            Some(ParsedTimestamp::Date(_))
        ));

        let eight_am = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();
        assert_eq!(
            ParsedTimestamp::parse("2024-03-01T08:00"),
            Some(ParsedTimestamp::Local(eight_am))
        );
        assert_eq!(
            ParsedTimestamp::parse("2024-03-01 08:00"),
            Some(ParsedTimestamp::Local(eight_am))
        );

        assert_eq!(ParsedTimestamp::parse("yesterday-ish"), None);
        assert_eq!(ParsedTimestamp::parse("   "), None);
    }

    #[test]
    fn test_instant_day_follows_time_zone() {
        let ts = ParsedTimestamp::parse("2024-03-01T23:30:00Z").unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(ts.day_in(&Utc), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(ts.day_in(&tokyo), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_local_timestamp_keeps_wall_clock_day() {
        let ts = ParsedTimestamp::parse("2024-03-01T23:30:00").unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(ts.day_in(&tokyo), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let instant = ts.instant_in(&tokyo).unwrap();
        assert_eq!(instant.hour(), 23);
    }

    #[test]
    fn test_day_key_ordering_and_display() {
        let early = DayKey::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let late = DayKey::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let broken = DayKey::Unparsed("0000-garbage".to_string());

        assert!(early < late);
        assert!(late < broken);
        assert_eq!(early.to_string(), "2024-01-05");
        assert_eq!(serde_json::to_string(&broken).unwrap(), r#""0000-garbage""#);
    }

    #[test]
    fn test_malformed_day_key_is_trimmed_raw_value() {
        let record = FeedbackRecord::new(3, "x", "  not a date ");
        assert_eq!(
            record.day_key_in(&Utc),
            DayKey::Unparsed("not a date".to_string())
        );
    }

    #[test]
    fn test_stats_from_counts() {
        let stats = SentimentStats::from_counts(1, 1, 2, 4);
        assert_eq!(stats.positive_percentage, Some(25.0));
        assert_eq!(stats.negative_percentage, Some(50.0));
        assert_eq!(stats.count(SentimentLabel::Neutral), 1);

        let empty = SentimentStats::from_counts(0, 0, 0, 0);
        assert_eq!(empty.positive_percentage, None);
        assert_eq!(
            serde_json::to_string(&empty).unwrap(),
            r#"{"positive":0,"neutral":0,"negative":0,"total":0}"#
        );
    }
}
