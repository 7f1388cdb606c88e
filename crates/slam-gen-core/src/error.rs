//! Error types for the configuration generator
//!
//! This module defines all error types used throughout the crate.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the configuration generator
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or exhausted SOA serial number
    #[error("SOA serial error: {0}")]
    Serial(String),

    /// Managed section markers missing, repeated or out of order
    #[error("Section structure error: {0}")]
    Structure(String),

    /// Input record that cannot be rendered
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O failure tied to a specific file
    #[error("Failed to access {}: {source}", path.display())]
    Source {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O errors on standard streams
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a SOA serial error
    pub fn serial(msg: impl Into<String>) -> Self {
        Self::Serial(msg.into())
    }

    /// Create a section structure error
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Wrap an I/O error with the path it occurred on
    pub fn file(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Source {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
