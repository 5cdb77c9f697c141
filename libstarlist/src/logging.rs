//! Centralized logging configuration for Starlist binaries
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - Writing to a log file, since the TUI owns stderr's terminal
//!
//! # Examples
//!
//! ```no_run
//! use libstarlist::logging::{LoggingConfig, LogFormat, LogTarget};
//!
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), false)
//!     .with_target(LogTarget::File("/tmp/starlist.log".into()));
//! config.init().expect("logging");
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Result, StarlistError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to a file, creating parent directories as needed
    File(PathBuf),
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
    pub target: LogTarget,
}

impl LoggingConfig {
    /// Create a new logging configuration writing to stderr
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `verbose` - If true, defaults to debug level
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
            target: LogTarget::Stderr,
        }
    }

    pub fn with_target(self, target: LogTarget) -> Self {
        Self { target, ..self }
    }

    fn filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
        }
    }

    /// Initialize logging with the configured settings
    ///
    /// This should be called once at the start of your program. A second
    /// call leaves the first subscriber in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened.
    pub fn init(&self) -> Result<()> {
        match self.target {
            LogTarget::Stderr => {
                self.install(std::io::stderr);
            }
            LogTarget::File(ref path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| log_file_error(path, source))?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| log_file_error(path, source))?;
                self.install(Mutex::new(file));
            }
        }
        Ok(())
    }

    fn install<W>(&self, writer: W)
    where
        W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = self.filter();
        let ansi = self.target == LogTarget::Stderr;

        // try_init: tests and embedders may have installed a subscriber already
        let _ = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_level(true)
                .try_init(),
        };
    }
}

fn log_file_error(path: &Path, source: std::io::Error) -> StarlistError {
    StarlistError::LogFile {
        path: path.to_path_buf(),
        source,
    }
}

/// Initialize logging with default settings
///
/// Respects `STARLIST_LOG_FORMAT` and `STARLIST_LOG_LEVEL` environment variables.
/// Falls back to text format with info level if not set.
pub fn init_default(target: LogTarget) -> Result<()> {
    let format = std::env::var("STARLIST_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("STARLIST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level, false)
        .with_target(target)
        .init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        // Case insensitive
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_from_str_invalid() {
        let result = "invalid".parse::<LogFormat>();
        assert!(result.unwrap_err().contains("Invalid log format: 'invalid'"));
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Text.to_string(), "text");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
    }

    #[test]
    fn test_logging_config_defaults_to_stderr() {
        let config = LoggingConfig::new(LogFormat::Json, "debug".to_string(), true);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "debug");
        assert!(config.verbose);
        assert_eq!(config.target, LogTarget::Stderr);
    }

    #[test]
    fn test_file_target_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("starlist.log");

        LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_target(LogTarget::File(path.clone()))
            .init()
            .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_unusable_log_path_reports_log_file_error() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        // Parent "directory" is a regular file
        let path = blocker.path().join("starlist.log");

        let result = LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_target(LogTarget::File(path.clone()))
            .init();

        match result {
            Err(StarlistError::LogFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected StarlistError::LogFile, got {:?}", other),
        }
    }
}
