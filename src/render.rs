//! Chart Rendering
//!
//! Dashboard data is plain values; a [`ChartRenderer`] turns it into
//! something a person can look at. Two renderers ship with the crate:
//! - `TextRenderer`: stat cards, bar charts and a table for terminals
//! - `CsvRenderer`: one CSV block per chart, for spreadsheets

use std::fmt::Write as _;
use thiserror::Error;

use crate::analytics::{
    binned_total, DailyTally, DashboardFilters, ScoreBin, SentimentDistribution,
    SentimentFilter, SentimentPercentages,
};
use crate::dashboard::{DashboardSnapshot, FeedbackRow};
use crate::feedback::SentimentLabel;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Pluggable chart capability
///
/// Each method draws one dashboard section on its own.
pub trait ChartRenderer {
    /// Active sentiment and date-range filters
    fn render_filters(&mut self, filters: &DashboardFilters) -> Result<(), RenderError>;

    /// Stat cards: total and per-label counts with percentages
    fn render_summary(
        &mut self,
        total: usize,
        distribution: &SentimentDistribution,
        percentages: &SentimentPercentages,
    ) -> Result<(), RenderError>;

    /// Sentiment distribution chart
    fn render_distribution(
        &mut self,
        distribution: &SentimentDistribution,
    ) -> Result<(), RenderError>;

    /// Sentiment trend over time
    fn render_trend(&mut self, trend: &[DailyTally]) -> Result<(), RenderError>;

    /// Score distribution chart
    fn render_histogram(&mut self, bins: &[ScoreBin]) -> Result<(), RenderError>;

    /// Recent feedback table
    fn render_feedback(&mut self, rows: &[FeedbackRow]) -> Result<(), RenderError>;

    /// Render every dashboard section in page order
    fn render_snapshot(&mut self, snapshot: &DashboardSnapshot) -> Result<(), RenderError> {
        self.render_summary(snapshot.total, &snapshot.distribution, &snapshot.percentages)?;
        self.render_filters(&snapshot.filters)?;
        self.render_distribution(&snapshot.distribution)?;
        self.render_histogram(&snapshot.histogram)?;
        self.render_trend(&snapshot.trend)?;
        self.render_feedback(&snapshot.recent)
    }
}

/// Serialize a snapshot as pretty JSON
pub fn snapshot_json(snapshot: &DashboardSnapshot) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Terminal renderer drawing fixed-width bars
pub struct TextRenderer {
    out: String,
    bar_width: usize,
}

impl TextRenderer {
    pub fn new(bar_width: usize) -> Self {
        Self {
            out: String::new(),
            bar_width,
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    /// Bar scaled against `max`; any non-zero value gets at least one cell
    fn bar(&self, value: usize, max: usize) -> String {
        if value == 0 || max == 0 {
            return String::new();
        }
        let cells = (value * self.bar_width / max).max(1);
        "#".repeat(cells)
    }

    fn heading(&mut self, title: &str) -> Result<(), RenderError> {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "-".repeat(title.len()))?;
        Ok(())
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(40)
    }
}

impl ChartRenderer for TextRenderer {
    fn render_filters(&mut self, filters: &DashboardFilters) -> Result<(), RenderError> {
        let sentiment = match filters.sentiment {
            SentimentFilter::All => "All Sentiments",
            SentimentFilter::Only(label) => label.as_str(),
        };
        writeln!(
            self.out,
            "Showing: {}, {}",
            sentiment,
            filters.date_range.label()
        )?;
        Ok(())
    }

    fn render_summary(
        &mut self,
        total: usize,
        distribution: &SentimentDistribution,
        percentages: &SentimentPercentages,
    ) -> Result<(), RenderError> {
        self.heading("Feedback Dashboard")?;
        writeln!(self.out, "{:<10} {:>6}", "Total", total)?;
        for (label, pct) in [
            (SentimentLabel::Positive, percentages.positive),
            (SentimentLabel::Neutral, percentages.neutral),
            (SentimentLabel::Negative, percentages.negative),
        ] {
            writeln!(
                self.out,
                "{:<10} {:>6} {:>4}%",
                label.as_str(),
                distribution.count(label),
                pct
            )?;
        }
        Ok(())
    }

    fn render_distribution(
        &mut self,
        distribution: &SentimentDistribution,
    ) -> Result<(), RenderError> {
        self.heading("Sentiment Distribution")?;
        // bars are shares of all records, like the percentage cards
        for label in SentimentLabel::ALL {
            let count = distribution.count(label);
            let bar = self.bar(count, distribution.total);
            writeln!(
                self.out,
                "{:<10} | {:<width$} {}",
                label.as_str(),
                bar,
                count,
                width = self.bar_width
            )?;
        }
        Ok(())
    }

    fn render_trend(&mut self, trend: &[DailyTally]) -> Result<(), RenderError> {
        self.heading("Sentiment Trend Over Time")?;
        if trend.is_empty() {
            writeln!(self.out, "No data")?;
            return Ok(());
        }

        write!(self.out, "{:<12}", "Date")?;
        for label in SentimentLabel::ALL {
            write!(self.out, " {:>8}", label.as_str())?;
        }
        writeln!(self.out, " {:>6}", "total")?;

        for day in trend {
            write!(self.out, "{:<12}", day.date.to_string())?;
            for label in SentimentLabel::ALL {
                write!(self.out, " {:>8}", day.count(label))?;
            }
            writeln!(self.out, " {:>6}", day.total)?;
        }
        Ok(())
    }

    fn render_histogram(&mut self, bins: &[ScoreBin]) -> Result<(), RenderError> {
        self.heading("Sentiment Score Distribution")?;
        let max = bins.iter().map(|bin| bin.count).max().unwrap_or(0);
        for bin in bins {
            let bar = self.bar(bin.count, max);
            writeln!(
                self.out,
                "{:<8} | {:<width$} {}",
                bin.range,
                bar,
                bin.count,
                width = self.bar_width
            )?;
        }
        writeln!(self.out, "{} scored", binned_total(bins))?;
        Ok(())
    }

    fn render_feedback(&mut self, rows: &[FeedbackRow]) -> Result<(), RenderError> {
        self.heading("Recent Feedback")?;
        if rows.is_empty() {
            writeln!(self.out, "No feedback available with the selected filters.")?;
            return Ok(());
        }

        writeln!(
            self.out,
            "{:<6} {:<12} {:<10} {:<6} {}",
            "ID", "Date", "Sentiment", "Score", "Feedback"
        )?;
        for row in rows {
            writeln!(
                self.out,
                "{:<6} {:<12} {:<10} {:<6} {}",
                row.id,
                row.date,
                row.sentiment,
                row.score,
                truncate(&row.text, 60)
            )?;
        }
        Ok(())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let cut: String = single_line.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// CSV renderer, one header row per chart section
pub struct CsvRenderer {
    writer: csv::Writer<Vec<u8>>,
}

impl CsvRenderer {
    pub fn new() -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(Vec::new()),
        }
    }

    pub fn into_string(self) -> Result<String, RenderError> {
        let bytes = self
            .writer
            .into_inner()
            .map_err(|e| RenderError::Io(e.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for CsvRenderer {
    fn render_filters(&mut self, filters: &DashboardFilters) -> Result<(), RenderError> {
        self.writer.write_record(["sentiment_filter", "date_range"])?;
        self.writer.write_record([
            filters.sentiment.to_string(),
            filters.date_range.to_string(),
        ])?;
        Ok(())
    }

    fn render_summary(
        &mut self,
        total: usize,
        _distribution: &SentimentDistribution,
        _percentages: &SentimentPercentages,
    ) -> Result<(), RenderError> {
        // per-label rows are the distribution section
        self.writer.write_record(["total"])?;
        self.writer.write_record([total.to_string()])?;
        Ok(())
    }

    fn render_distribution(
        &mut self,
        distribution: &SentimentDistribution,
    ) -> Result<(), RenderError> {
        self.writer.write_record(["sentiment", "count", "percentage"])?;
        for label in SentimentLabel::ALL {
            self.writer.write_record([
                label.as_str().to_string(),
                distribution.count(label).to_string(),
                distribution.percentage(label).to_string(),
            ])?;
        }
        Ok(())
    }

    fn render_trend(&mut self, trend: &[DailyTally]) -> Result<(), RenderError> {
        self.writer
            .write_record(["date", "positive", "neutral", "negative", "total"])?;
        for day in trend {
            let mut record = vec![day.date.to_string()];
            record.extend(SentimentLabel::ALL.map(|label| day.count(label).to_string()));
            record.push(day.total.to_string());
            self.writer.write_record(&record)?;
        }
        Ok(())
    }

    fn render_histogram(&mut self, bins: &[ScoreBin]) -> Result<(), RenderError> {
        self.writer.write_record(["range", "count"])?;
        for bin in bins {
            self.writer
                .write_record([bin.range.to_string(), bin.count.to_string()])?;
        }
        Ok(())
    }

    fn render_feedback(&mut self, rows: &[FeedbackRow]) -> Result<(), RenderError> {
        self.writer
            .write_record(["id", "date", "sentiment", "score", "text"])?;
        for row in rows {
            self.writer.write_record([
                row.id.to_string(),
                row.date.clone(),
                row.sentiment.clone(),
                row.score.clone(),
                row.text.clone(),
            ])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{score_histogram, DateRange};
    use crate::feedback::{DayKey, FeedbackRecord};
    use chrono::NaiveDate;

    fn tally(day: u32, positive: usize, negative: usize) -> DailyTally {
        DailyTally {
            date: DayKey::Date(NaiveDate::from_ymd_opt(2024, 3, day).unwrap()),
            positive,
            neutral: 0,
            negative,
            total: positive + negative,
        }
    }

    fn snapshot() -> DashboardSnapshot {
        let records = vec![
            FeedbackRecord::new(1, "Great, thanks", "2024-03-01").label("positive").score(0.9),
            FeedbackRecord::new(2, "Broken again", "2024-03-02").label("negative").score(0.1),
        ];
        let distribution = SentimentDistribution::from_records(&records);

        DashboardSnapshot {
            filters: DashboardFilters::default(),
            total: 2,
            distribution,
            percentages: distribution.percentages(),
            trend: vec![tally(1, 1, 0), tally(2, 0, 1)],
            histogram: score_histogram(&records),
            recent: vec![FeedbackRow {
                id: 2,
                date: "2024-03-02".to_string(),
                text: "Broken again".to_string(),
                sentiment: "negative".to_string(),
                score: "0.10".to_string(),
            }],
        }
    }

    #[test]
    fn test_text_histogram_bars() {
        let records = vec![
            FeedbackRecord::new(1, "a", "2024-03-01").score(0.1),
            FeedbackRecord::new(2, "b", "2024-03-01").score(0.15),
            FeedbackRecord::new(3, "c", "2024-03-01").score(0.9),
        ];
        let mut renderer = TextRenderer::new(10);
        renderer.render_histogram(&score_histogram(&records)).unwrap();
        let out = renderer.into_string();

        assert!(out.contains("0.0-0.2  | ########## 2"));
        assert!(out.contains("0.8-1.0  | #####      1"));
        assert!(out.contains("0.4-0.6  |            0"));
        assert!(out.contains("3 scored"));
    }

    #[test]
    fn test_text_snapshot_sections() {
        let mut renderer = TextRenderer::default();
        renderer.render_snapshot(&snapshot()).unwrap();
        let out = renderer.into_string();

        for section in [
            "Feedback Dashboard",
            "Sentiment Distribution",
            "Sentiment Score Distribution",
            "Sentiment Trend Over Time",
            "Recent Feedback",
        ] {
            assert!(out.contains(section), "missing section {}", section);
        }
        assert!(out.contains("positive        1   50%"));
        assert!(out.contains("Showing: All Sentiments, All Time"));
        assert!(out.contains("2024-03-02          0        0        1      1"));
    }

    #[test]
    fn test_text_filters_line() {
        let mut renderer = TextRenderer::default();
        renderer
            .render_filters(&DashboardFilters::new(
                SentimentFilter::Only(SentimentLabel::Negative),
                DateRange::Week,
            ))
            .unwrap();

        assert_eq!(renderer.into_string(), "Showing: negative, Last 7 Days\n");
    }

    #[test]
    fn test_csv_distribution_section() {
        let records = vec![
            FeedbackRecord::new(1, "a", "2024-03-01").label("positive"),
            FeedbackRecord::new(2, "b", "2024-03-01").label("positive"),
            FeedbackRecord::new(3, "c", "2024-03-01").label("negative"),
        ];
        let mut renderer = CsvRenderer::new();
        renderer
            .render_distribution(&SentimentDistribution::from_records(&records))
            .unwrap();

        assert_eq!(
            renderer.into_string().unwrap(),
            "sentiment,count,percentage\npositive,2,67\nneutral,0,0\nnegative,1,33\n"
        );
    }

    #[test]
    fn test_text_empty_sections() {
        let mut renderer = TextRenderer::default();
        renderer.render_trend(&[]).unwrap();
        renderer.render_feedback(&[]).unwrap();
        let out = renderer.into_string();

        assert!(out.contains("No data"));
        assert!(out.contains("No feedback available with the selected filters."));
    }

    #[test]
    fn test_csv_trend() {
        let mut renderer = CsvRenderer::new();
        renderer.render_trend(&[tally(1, 2, 1)]).unwrap();
        let out = renderer.into_string().unwrap();

        assert_eq!(out, "date,positive,neutral,negative,total\n2024-03-01,2,0,1,3\n");
    }

    #[test]
    fn test_csv_snapshot_quotes_text() {
        let mut snap = snapshot();
        snap.recent[0].text = "Broken, again".to_string();

        let mut renderer = CsvRenderer::new();
        renderer.render_snapshot(&snap).unwrap();
        let out = renderer.into_string().unwrap();

        assert!(out.starts_with(concat!(
            "total\n2\n",
            "sentiment_filter,date_range\nall,all\n",
            "sentiment,count,percentage\npositive,1,50\n",
        )));
        assert!(out.contains("range,count\n0.0-0.2,1\n"));
        assert!(out.contains("\"Broken, again\""));
    }

    #[test]
    fn test_snapshot_json() {
        let json = snapshot_json(&snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total"], 2);
        assert_eq!(value["percentages"]["negative"], 50);
        assert_eq!(value["trend"][0]["date"], "2024-03-01");
        assert_eq!(value["histogram"].as_array().unwrap().len(), 5);
        assert_eq!(value["filters"]["sentiment"], "all");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("line one\nline two", 40), "line one line two");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }
}
