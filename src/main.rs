//! Sentiment Dashboard CLI
//!
//! Terminal front end for the feedback system:
//! - Show the dashboard (stat cards, charts, recent feedback)
//! - Show a single chart (trend or score histogram)
//! - Submit feedback
//! - Generate a config file

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sentiment_dashboard::config::{generate_default_config, Config};
use sentiment_dashboard::logging;
use sentiment_dashboard::{
    snapshot_json, ChartRenderer, CsvRenderer, DashboardSnapshot, DashboardState, DateRange,
    FeedbackClient, FeedbackSource, JsonFileSource, SentimentFilter, TextRenderer,
};

#[derive(Parser)]
#[command(name = "sentiment-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Submit feedback and explore its sentiment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Feedback backend base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Read feedback from a JSON file instead of the backend
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Sentiment filter: all, positive, neutral, negative
    #[arg(short, long, global = true)]
    pub sentiment: Option<SentimentFilter>,

    /// Date range filter: all, today, week, month
    #[arg(short, long, global = true)]
    pub range: Option<DateRange>,

    /// Rows in the recent feedback table
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the full dashboard
    Dashboard,

    /// Show sentiment counts per day
    Trend,

    /// Show the sentiment score histogram
    Histogram,

    /// List recent feedback
    List,

    /// Submit new feedback
    Submit {
        /// Feedback text (3 to 1000 characters)
        text: String,
    },

    /// Show a single feedback entry
    Show {
        /// Feedback ID
        id: u64,
    },

    /// Show label statistics for all feedback
    Stats,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_path) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::load_default()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    logging::init(&config.logging).context("Failed to initialize logging")?;
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let source: Box<dyn FeedbackSource> = match &cli.input {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(FeedbackClient::from_config(&config.api)?),
    };

    match &cli.command {
        Commands::Dashboard | Commands::Trend | Commands::Histogram | Commands::List => {
            let mut filters = config.dashboard.filters();
            if let Some(sentiment) = cli.sentiment {
                filters.sentiment = sentiment;
            }
            if let Some(range) = cli.range {
                filters.date_range = range;
            }
            let limit = cli.limit.unwrap_or(config.dashboard.recent_limit);

            let mut state = DashboardState::new(filters);
            state.refresh(&*source).await;
            if let Some(message) = state.error() {
                bail!("{} (source: {})", message, source.name());
            }

            let snapshot = state.snapshot(&Local::now(), limit);
            print!("{}", render(&cli.command, &snapshot, cli.format)?);
        }

        Commands::Submit { text } => {
            let created = source
                .submit_feedback(text)
                .await
                .context("An error occurred while submitting feedback")?;

            println!("Thank you for your feedback!");
            if let Some(record) = created {
                let label = record.sentiment_label.as_deref().unwrap_or("pending");
                match record.finite_score() {
                    Some(score) => println!("Recorded #{}: {} ({:.2})", record.id, label, score),
                    None => println!("Recorded #{}: {}", record.id, label),
                }
            }
        }

        Commands::Show { id } => match source.get_feedback(*id).await? {
            Some(record) => match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                _ => {
                    println!("ID:        {}", record.id);
                    println!("Created:   {}", record.created_at);
                    println!(
                        "Sentiment: {}",
                        record.sentiment_label.as_deref().unwrap_or("N/A")
                    );
                    println!(
                        "Score:     {}",
                        record
                            .finite_score()
                            .map(|s| format!("{:.2}", s))
                            .unwrap_or_else(|| "N/A".to_string())
                    );
                    println!();
                    println!("{}", record.text);
                }
            },
            None => bail!("Feedback {} not found", id),
        },

        Commands::Stats => {
            let stats = source.stats().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                _ => {
                    println!("{:<10} {:>8} {:>8}", "Sentiment", "Count", "Share");
                    println!("{}", "-".repeat(28));
                    for (name, count, share) in [
                        ("positive", stats.positive, stats.positive_percentage),
                        ("neutral", stats.neutral, stats.neutral_percentage),
                        ("negative", stats.negative, stats.negative_percentage),
                    ] {
                        println!(
                            "{:<10} {:>8} {:>7.1}%",
                            name,
                            count,
                            share.unwrap_or(0.0)
                        );
                    }
                    println!("{:<10} {:>8}", "total", stats.total);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Render the part of the snapshot a data command asks for
fn render(
    command: &Commands,
    snapshot: &DashboardSnapshot,
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        let json = match command {
            Commands::Trend => serde_json::to_string_pretty(&snapshot.trend)?,
            Commands::Histogram => serde_json::to_string_pretty(&snapshot.histogram)?,
            Commands::List => serde_json::to_string_pretty(&snapshot.recent)?,
            _ => snapshot_json(snapshot)?,
        };
        return Ok(json + "\n");
    }

    match format {
        OutputFormat::Csv => {
            let mut renderer = CsvRenderer::new();
            draw(&mut renderer, command, snapshot)?;
            Ok(renderer.into_string()?)
        }
        _ => {
            let mut renderer = TextRenderer::default();
            draw(&mut renderer, command, snapshot)?;
            Ok(renderer.into_string())
        }
    }
}

fn draw<R: ChartRenderer>(
    renderer: &mut R,
    command: &Commands,
    snapshot: &DashboardSnapshot,
) -> anyhow::Result<()> {
    match command {
        Commands::Trend => renderer.render_trend(&snapshot.trend)?,
        Commands::Histogram => renderer.render_histogram(&snapshot.histogram)?,
        Commands::List => renderer.render_feedback(&snapshot.recent)?,
        _ => renderer.render_snapshot(snapshot)?,
    }
    Ok(())
}
