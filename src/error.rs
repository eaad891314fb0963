//! Error types for patreon-dl option resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Origin;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Resolution errors
    #[error("Missing required value: {0}")]
    MissingRequiredValue(String),

    #[error("Invalid boolean value '{value}' in {origin}: expected 'true' or 'false'")]
    InvalidBooleanValue { origin: Origin, value: String },

    #[error("Invalid numeric value '{value}' in {origin}")]
    InvalidNumericValue { origin: Origin, value: String },

    #[error("Invalid value '{value}' in {origin}: must be one of: {allowed}")]
    InvalidEnumValue {
        origin: Origin,
        value: String,
        allowed: String,
    },

    #[error("Invalid target URL '{url}': {reason}")]
    InvalidTargetUrl { url: String, reason: String },

    #[error("Error parsing targets file (line {line}): {source}")]
    TargetsFileParse {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    // File errors
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {message}", path.display())]
    ConfigFileParse { path: PathBuf, message: String },

    #[error("Failed to read targets file '{}': {source}", path.display())]
    TargetsFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came from resolving or validating options, as
    /// opposed to an I/O or output failure.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Json(_) | Error::Logging(_))
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
