//! Logging infrastructure
//!
//! Structured logging through the `tracing` crate. The library only emits
//! events; binaries call [`init_logging`] once to install a subscriber.
//!
//! # Usage
//!
//! ```rust
//! use recipe_diagrams::core::logging::init_logging;
//!
//! // Initialize with default settings
//! let _ = init_logging(None, None);
//! ```
//!
//! # What gets logged
//!
//! - `trace`: every node, edge, rank group and cluster added to a description
//! - `debug`: DOT sizes, undeclared edge endpoints, engine invocations
//! - `info`: finalized graphs and written artifacts
//! - `warn`: rejected descriptions and failed renders
//!
//! # Environment Variables
//!
//! - `RECIPE_DIAGRAMS_LOG_LEVEL`: log level (trace|debug|info|warn|error|off)
//! - `RUST_LOG`: standard `tracing-subscriber` filter directives
//! - `RECIPE_DIAGRAMS_LOG_FORMAT`: compact|pretty|json
//!
//! # Filtering Logs
//!
//! ```bash
//! # Watch a single diagram being assembled
//! RUST_LOG="recipe_diagrams::core::description=trace" recipe-diagrams dot dfd-level2
//!
//! # Everything at info, the renderer at debug
//! RUST_LOG="info,recipe_diagrams::core::renderer=debug" recipe-diagrams render
//! ```

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use tracing_subscriber::{
    fmt::{self as tracing_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV_VAR: &str = "RECIPE_DIAGRAMS_LOG_LEVEL";

/// Environment variable holding the log format
pub const LOG_FORMAT_ENV_VAR: &str = "RECIPE_DIAGRAMS_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Initialize the tracing subscriber
///
/// `level` falls back to `RECIPE_DIAGRAMS_LOG_LEVEL`, then `RUST_LOG`, then
/// `info`. `format` falls back to `RECIPE_DIAGRAMS_LOG_FORMAT`, then
/// `compact`.
///
/// Returns an error for an unknown format or when a global subscriber is
/// already installed.
pub fn init_logging(level: Option<&str>, format: Option<&str>) -> Result<()> {
    let log_level = level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV_VAR).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let log_format = format
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FORMAT_ENV_VAR).ok())
        .unwrap_or_else(|| "compact".to_string());

    let format = LogFormat::from_str(&log_format).map_err(|e| anyhow!("Invalid log format: {}", e))?;

    let filter = if log_level == "off" {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr so DOT written to stdout stays clean
    let result = match format {
        LogFormat::Compact => Registry::default()
            .with(filter)
            .with(
                tracing_fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true)
                    .with_span_events(FmtSpan::NONE),
            )
            .try_init(),
        LogFormat::Pretty => Registry::default()
            .with(filter)
            .with(
                tracing_fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::ACTIVE)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(
                tracing_fmt::Layer::default()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}
