// src/error.rs

//! Error types for boost-kitchen

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring, building or packaging
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O failure with additional context
    #[error("I/O error: {0}")]
    IoError(String),

    /// Malformed recipe, profile or command-line value
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unknown or unsupported setting value
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Unknown option, or an option that was removed by configuration
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Source download failed
    #[error("Download error: {0}")]
    DownloadError(String),

    /// Downloaded file did not match the expected checksum
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// A required file, directory or dependency is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// An external build step (bootstrap, b2, install) failed
    #[error("{phase} failed: {message}")]
    BuildFailed { phase: String, message: String },

    /// Client or environment initialization failed
    #[error("Initialization error: {0}")]
    InitError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a build failure for the given phase
    pub fn build_failed(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BuildFailed {
            phase: phase.into(),
            message: message.into(),
        }
    }
}
