//! Error types for Starlist

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StarlistError>;

#[derive(Error, Debug)]
pub enum StarlistError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StarlistError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            StarlistError::Fetch(FetchError::Network(_)) => 2,
            StarlistError::Fetch(_) => 1,
            StarlistError::Config(_) => 1,
            StarlistError::LogFile { .. } => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Failures of a single collection fetch
///
/// Both variants are collapsed into an empty, loaded screen by the loader;
/// they only surface in the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request was rejected at the transport layer
    #[error("Network error: {0}")]
    Network(String),

    /// The body was not JSON or had no `results` array
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
