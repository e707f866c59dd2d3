//! Error types for the smsprep library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for smsprep operations.
///
/// Validation failures are not errors: they are returned as a
/// [`ValidationReport`](crate::validation::ValidationReport). Only structural
/// problems with the input and I/O failures end up here.
#[derive(Debug, Error)]
pub enum SmsPrepError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure writing the cleaned output file.
    #[error("Failed to export '{path}': {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transform was requested without a passing validation run.
    #[error("File has not passed validation; validate it before formatting")]
    NotValidated,
}

/// Result type alias for smsprep operations.
pub type Result<T> = std::result::Result<T, SmsPrepError>;
