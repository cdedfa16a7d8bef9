//! Structured logging initialisation.
//!
//! Everything in the crate logs through `tracing`; this module installs the
//! subscriber. Output goes to stderr so it never mixes with CLI output.
//!
//! | Variable                      | Default | Meaning                          |
//! |-------------------------------|---------|----------------------------------|
//! | `RUST_LOG`                    | unset   | Full filter, wins when present   |
//! | `ROUTEMUX_LOG_LEVEL`          | `info`  | Base level                       |
//! | `ROUTEMUX_LOG_FORMAT`         | `json`  | `json` or `pretty`               |
//! | `ROUTEMUX_LOG_TARGET_FILTER`  | unset   | Extra directives, comma-separated|

use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Extra `EnvFilter` directives, e.g. `routemux::router=debug`
    pub target_filter: Option<String>,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("ROUTEMUX_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("ROUTEMUX_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            target_filter: env::var("ROUTEMUX_LOG_TARGET_FILTER").ok(),
        }
    }

    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
        }
    }

    /// Filter directives built from level and target filter.
    #[must_use]
    pub fn directives(&self) -> String {
        match &self.target_filter {
            Some(extra) if !extra.trim().is_empty() => format!("{},{}", self.log_level, extra),
            _ => self.log_level.clone(),
        }
    }
}

/// Install the global subscriber.
///
/// Fails if the directives do not parse or a subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.directives())
            .with_context(|| format!("invalid log filter '{}'", config.directives()))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    }
    .context("failed to install tracing subscriber")?;

    tracing::debug!(
        log_level = %config.log_level,
        format = ?config.format,
        "Logging initialised"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Json);
    }

    #[test]
    fn test_directives() {
        let mut config = LogConfig::default_dev();
        assert_eq!(config.directives(), "debug");
        config.target_filter = Some("routemux::router=trace".to_string());
        assert_eq!(config.directives(), "debug,routemux::router=trace");
        config.target_filter = Some("  ".to_string());
        assert_eq!(config.directives(), "debug");
    }
}
