//! Error types for the pattern catalog.

use thiserror::Error;

/// Errors that can occur while loading or assembling patterns.
#[derive(Error, Debug)]
pub enum PatternError {
    /// Pattern pack file not found
    #[error("pattern file not found at {path}")]
    NotFound {
        /// Expected file path
        path: String,
    },

    /// Failed to parse a pattern pack
    #[error("failed to parse pattern TOML in {path}: {source}")]
    ParseError {
        /// Path to the pattern file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// A pattern failed validation
    #[error("invalid pattern '{text}': {reason}")]
    ValidationError {
        /// Pattern text
        text: String,
        /// Reason for validation failure
        reason: String,
    },

    /// I/O error while reading a pattern pack
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pattern operations.
pub type Result<T> = std::result::Result<T, PatternError>;
