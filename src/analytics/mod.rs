//! Feedback Analytics
//!
//! Pure transformations from a slice of feedback records into the data
//! the dashboard charts consume. Nothing here performs I/O or keeps state.
//!
//! - [`daily_trend`]: label counts per calendar day, ascending
//! - [`score_histogram`]: five fixed score bins
//! - [`SentimentDistribution`]: label counts and display percentages
//! - [`DashboardFilters`]: sentiment and date-range filtering

mod distribution;
mod filter;
mod histogram;
mod trend;

pub use distribution::{percentage, SentimentDistribution, SentimentPercentages};
pub use filter::{DashboardFilters, DateRange, SentimentFilter};
pub use histogram::{
    bin_index, binned_total, score_histogram, ScoreBin, BIN_COUNT, SCORE_RANGES,
};
pub use trend::{daily_trend, daily_trend_in, DailyTally};
