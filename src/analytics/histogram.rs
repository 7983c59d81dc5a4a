//! Sentiment score histogram
//!
//! Five fixed bins over [0, 1]. Bins are left-inclusive and
//! right-exclusive, except the last which also includes 1.0.

use serde::Serialize;

use crate::feedback::FeedbackRecord;

/// Number of score bins
pub const BIN_COUNT: usize = 5;

/// Bin labels in output order
pub const SCORE_RANGES: [&str; BIN_COUNT] =
    ["0.0-0.2", "0.2-0.4", "0.4-0.6", "0.6-0.8", "0.8-1.0"];

/// Upper (exclusive) bounds of the first four bins
const UPPER_BOUNDS: [f64; BIN_COUNT - 1] = [0.2, 0.4, 0.6, 0.8];

/// Number of records whose score falls in one range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBin {
    pub range: &'static str,
    pub count: usize,
}

/// Index of the bin a score belongs to
///
/// Finite scores outside [0, 1] are clamped into the edge bins.
/// Non-finite scores belong nowhere.
pub fn bin_index(score: f64) -> Option<usize> {
    if !score.is_finite() {
        return None;
    }

    let score = score.clamp(0.0, 1.0);
    Some(
        UPPER_BOUNDS
            .iter()
            .position(|&upper| score < upper)
            .unwrap_or(BIN_COUNT - 1),
    )
}

/// Count records per score range
///
/// Always returns all five bins in [`SCORE_RANGES`] order; records
/// without a score are left out entirely.
pub fn score_histogram<'a, I>(records: I) -> [ScoreBin; BIN_COUNT]
where
    I: IntoIterator<Item = &'a FeedbackRecord>,
{
    let mut counts = [0usize; BIN_COUNT];

    for record in records {
        match record.sentiment_score.and_then(bin_index) {
            Some(idx) => counts[idx] += 1,
            None if record.sentiment_score.is_some() => {
                tracing::debug!(id = record.id, "Skipping non-finite sentiment score");
            }
            None => {}
        }
    }

    std::array::from_fn(|idx| ScoreBin {
        range: SCORE_RANGES[idx],
        count: counts[idx],
    })
}

/// Total number of binned records
pub fn binned_total(bins: &[ScoreBin]) -> usize {
    bins.iter().map(|bin| bin.count).sum()
}
