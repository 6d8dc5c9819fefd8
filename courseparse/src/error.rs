//! Error types for course item parsing.
//!
//! Malformed course text never produces an error; the parsers degrade to
//! sparser records instead. Only contract violations by the caller (missing
//! identifiers, unusable marker tables) and I/O failures end up here.

use std::path::PathBuf;

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading input records, building parsers, or
/// persisting parse results.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A mandatory key is absent from the input record.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing key.
        field: String,
    },

    /// A mandatory key is present but holds an unusable value.
    #[error("Invalid value for field '{field}': {message}")]
    InvalidField {
        /// Name of the offending key.
        field: String,
        /// Description of why the value was rejected.
        message: String,
    },

    /// The record's type tag names no known parser.
    #[error("Unknown item type '{0}'")]
    UnknownKind(String),

    /// A marker table could not be turned into a working parser.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON error from serde_json.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error from serde_yaml.
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Writing a parse result to disk failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Creates a missing field error.
    #[inline]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid field error.
    #[inline]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an I/O error bound to the path that failed.
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
