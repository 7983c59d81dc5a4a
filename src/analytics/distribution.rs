//! Sentiment distribution
//!
//! Per-label counts and rounded display percentages.

use serde::Serialize;

use crate::feedback::{FeedbackRecord, SentimentLabel, SentimentStats};

/// Label counts over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Every record considered, including unlabeled ones
    pub total: usize,
}

/// Rounded percentage per label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentPercentages {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

impl SentimentDistribution {
    /// Tally labels over records
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FeedbackRecord>,
    {
        let mut dist = Self::default();
        for record in records {
            dist.total += 1;
            match record.sentiment() {
                Some(SentimentLabel::Positive) => dist.positive += 1,
                Some(SentimentLabel::Neutral) => dist.neutral += 1,
                Some(SentimentLabel::Negative) => dist.negative += 1,
                None => {}
            }
        }
        dist
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    /// Rounded share of `label` in percent, 0 when there are no records
    pub fn percentage(&self, label: SentimentLabel) -> u32 {
        percentage(self.count(label), self.total)
    }

    pub fn percentages(&self) -> SentimentPercentages {
        SentimentPercentages {
            positive: self.percentage(SentimentLabel::Positive),
            neutral: self.percentage(SentimentLabel::Neutral),
            negative: self.percentage(SentimentLabel::Negative),
        }
    }
}

impl From<&SentimentDistribution> for SentimentStats {
    fn from(dist: &SentimentDistribution) -> Self {
        SentimentStats::from_counts(
            dist.positive as u64,
            dist.neutral as u64,
            dist.negative as u64,
            dist.total as u64,
        )
    }
}

/// `round(count / total * 100)`, with a zero total yielding 0
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(id: u64, label: Option<&str>) -> FeedbackRecord {
        let r = FeedbackRecord::new(id, "text", "2024-03-01");
        match label {
            Some(l) => r.label(l),
            None => r,
        }
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let records: Vec<FeedbackRecord> = Vec::new();
        let dist = SentimentDistribution::from_records(&records);

        assert_eq!(dist.total, 0);
        assert_eq!(dist.percentages(), SentimentPercentages::default());
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_counts_and_rounding() {
        let records = vec![
            labeled(1, Some("positive")),
            labeled(2, Some("positive")),
            labeled(3, Some("negative")),
        ];
        let dist = SentimentDistribution::from_records(&records);

        assert_eq!(dist.positive, 2);
        assert_eq!(dist.negative, 1);
        assert_eq!(dist.percentage(SentimentLabel::Positive), 67);
        assert_eq!(dist.percentage(SentimentLabel::Negative), 33);
        assert_eq!(dist.percentage(SentimentLabel::Neutral), 0);
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 200), 1); // 0.5
    }

    #[test]
    fn test_unlabeled_records_dilute_shares() {
        let records = vec![
            labeled(1, Some("neutral")),
            labeled(2, None),
            labeled(3, Some("unknown")),
            labeled(4, Some("neutral")),
        ];
        let dist = SentimentDistribution::from_records(&records);

        assert_eq!(dist.total, 4);
        assert_eq!(dist.neutral, 2);
        assert_eq!(dist.percentage(SentimentLabel::Neutral), 50);
    }

    #[test]
    fn test_into_stats() {
        let records = vec![labeled(1, Some("positive")), labeled(2, Some("negative"))];
        let stats = SentimentStats::from(&SentimentDistribution::from_records(&records));

        assert_eq!(stats.total, 2);
        assert_eq!(stats.positive_percentage, Some(50.0));
    }
}
