//! Error types and error handling for Lorekeeper.
//!
//! This module defines the error types used throughout the
//! application. Most of them are recovered close to where they are
//! raised (a broken session artifact skips one session, a broken
//! cache forces a rebuild); only configuration and path problems are
//! expected to reach the CLI.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Lorekeeper operations
pub type Result<T> = std::result::Result<T, LorekeeperError>;

/// Main error type for Lorekeeper
#[derive(Error, Debug)]
pub enum LorekeeperError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to parse session artifact {path:?}: {message}")]
    ArtifactParse { path: PathBuf, message: String },

    #[error("Cache load failed: {0}")]
    CacheLoad(String),

    #[error("Cache write failed: {0}")]
    CacheWrite(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Query rejected before or during evaluation.
///
/// Carried inside a search response so callers can tell "the query was
/// bad" apart from "nothing matched".
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryError {
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Query is too long ({length} chars, max {max})")]
    TooLong { length: usize, max: usize },
}

impl LorekeeperError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Errors that the indexer and exporter absorb instead of failing the batch
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LorekeeperError::ArtifactParse { .. }
                | LorekeeperError::CacheLoad(_)
                | LorekeeperError::CacheWrite(_)
                | LorekeeperError::ExportFailed(_)
        )
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            LorekeeperError::Query(_)
                | LorekeeperError::InvalidPath(_)
                | LorekeeperError::ConfigError(_)
        )
    }
}
