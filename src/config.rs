//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analytics::{DashboardFilters, DateRange, SentimentFilter};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Feedback backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL that `/feedback` is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Dashboard defaults
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub sentiment: SentimentFilter,

    #[serde(default)]
    pub date_range: DateRange,

    /// Rows shown in the recent feedback table
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_recent_limit() -> usize {
    20
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sentiment: SentimentFilter::All,
            date_range: DateRange::All,
            recent_limit: default_recent_limit(),
        }
    }
}

impl DashboardConfig {
    pub fn filters(&self) -> DashboardFilters {
        DashboardFilters::new(self.sentiment, self.date_range)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Standard config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("sentiment-dashboard").join("config.toml"));
        }
        paths.push(PathBuf::from("./sentiment-dashboard.toml"));
        paths
    }

    /// Load the first existing file among `candidates`, or defaults when none exists
    ///
    /// A file that exists but cannot be read or parsed is an error, not a
    /// reason to fall back. Returns the path that was used, if any.
    pub fn load_first(candidates: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env()?, None)),
        }
    }

    /// Load from the standard locations or environment
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the process environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SENTIMENT_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("SENTIMENT_API_TIMEOUT") {
            self.api.request_timeout_secs =
                timeout.trim().parse().map_err(|_| ConfigError::Env {
                    key: "SENTIMENT_API_TIMEOUT",
                    value: timeout.clone(),
                })?;
        }

        if let Some(level) = lookup("SENTIMENT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SENTIMENT_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value:?}")]
    Env { key: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sentiment Dashboard Configuration
#
# Environment variables override these settings:
# - SENTIMENT_API_URL
# - SENTIMENT_API_TIMEOUT
# - SENTIMENT_LOG_LEVEL
# - SENTIMENT_LOG_FORMAT

[api]
# Base URL of the feedback backend (/feedback is appended)
base_url = "http://localhost:8080/api"

# Request timeout in seconds
request_timeout_secs = 30

[dashboard]
# Sentiment filter: all, positive, neutral, negative
sentiment = "all"

# Date range filter: all, today, week, month
date_range = "all"

# Rows shown in the recent feedback table
recent_limit = 20

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::SentimentLabel;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.dashboard.recent_limit, 20);
        assert_eq!(config.dashboard.filters(), DashboardFilters::default());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_round_trips() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, default_base_url());
        assert_eq!(config.dashboard.sentiment, SentimentFilter::All);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[api]
base_url = "http://feedback.internal/api"

[dashboard]
sentiment = "negative"
date_range = "week""#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://feedback.internal/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(
            config.dashboard.sentiment,
            SentimentFilter::Only(SentimentLabel::Negative)
        );
        assert_eq!(config.dashboard.date_range, DateRange::Week);
        assert_eq!(config.dashboard.recent_limit, 20);
    }

    #[test]
    fn test_load_rejects_bad_filter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\ndate_range = \"fortnight\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SENTIMENT_API_URL", "http://override:9000/api"),
            ("SENTIMENT_API_TIMEOUT", "5"),
            ("SENTIMENT_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.base_url, "http://override:9000/api");
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_timeout_override_is_an_error() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == "SENTIMENT_API_TIMEOUT").then(|| "soon".to_string()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Env { key: "SENTIMENT_API_TIMEOUT", .. }));
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_first_uses_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let present = dir.path().join("present.toml");
        std::fs::write(&present, "[dashboard]\nrecent_limit = 5\n").unwrap();

        let (config, used) = Config::load_first(&[missing, present.clone()]).unwrap();
        assert_eq!(used, Some(present));
        assert_eq!(config.dashboard.recent_limit, 5);
    }

    #[test]
    fn test_load_first_surfaces_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("sentiment-dashboard.toml");
        std::fs::write(&broken, "[dashboard]\ndate_range = \"fortnight\"\n").unwrap();
        let fallback = dir.path().join("config.toml");
        std::fs::write(&fallback, "[dashboard]\nrecent_limit = 5\n").unwrap();

        let err = Config::load_first(&[broken.clone(), fallback]).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, broken),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_first_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, used) = Config::load_first(&[dir.path().join("absent.toml")]).unwrap();
        assert_eq!(used, None);
        assert_eq!(config.dashboard.recent_limit, 20);
    }
}
