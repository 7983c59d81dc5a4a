//! Daily sentiment trend
//!
//! Groups feedback by calendar day and tallies labels per day. Only days
//! that actually have feedback appear in the output.

use chrono::{Local, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::feedback::{DayKey, FeedbackRecord, SentimentLabel};

/// Label counts for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTally {
    pub date: DayKey,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// All records on this day, labeled or not
    pub total: usize,
}

impl DailyTally {
    /// Empty tally for a day
    pub fn new(date: DayKey) -> Self {
        Self {
            date,
            positive: 0,
            neutral: 0,
            negative: 0,
            total: 0,
        }
    }

    /// Count one record with the given (possibly unrecognised) label
    pub fn add(&mut self, label: Option<SentimentLabel>) {
        self.total += 1;
        match label {
            Some(SentimentLabel::Positive) => self.positive += 1,
            Some(SentimentLabel::Neutral) => self.neutral += 1,
            Some(SentimentLabel::Negative) => self.negative += 1,
            None => {}
        }
    }

    /// Count for one label
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }
}

/// Daily trend in the viewer's local time zone
pub fn daily_trend<'a, I>(records: I) -> Vec<DailyTally>
where
    I: IntoIterator<Item = &'a FeedbackRecord>,
{
    daily_trend_in(records, &Local)
}

/// Daily trend with days cut in the given time zone
///
/// Output is strictly ascending by [`DayKey`]; malformed timestamps are
/// grouped under their trimmed raw string and sort after every real date.
pub fn daily_trend_in<'a, I, Tz>(records: I, tz: &Tz) -> Vec<DailyTally>
where
    I: IntoIterator<Item = &'a FeedbackRecord>,
    Tz: TimeZone,
{
    let mut by_day: BTreeMap<DayKey, DailyTally> = BTreeMap::new();

    for record in records {
        let key = record.day_key_in(tz);
        by_day
            .entry(key.clone())
            .or_insert_with(|| DailyTally::new(key))
            .add(record.sentiment());
    }

    by_day.into_values().collect()
}
