//! Error types for contact list ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing CSV.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, exceeding the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Only UTF-8 input is accepted.
    #[error("unsupported encoding {encoding}; save the file as UTF-8")]
    UnsupportedEncoding { encoding: &'static str },

    /// Input has no header row.
    #[error("CSV input has no header row")]
    MissingHeader,

    /// Malformed CSV.
    #[error("failed to parse CSV: {source}")]
    Parse {
        #[source]
        source: csv::Error,
    },

    /// Failed to render CSV output.
    #[error("failed to write CSV: {message}")]
    Write { message: String },
}

impl From<csv::Error> for IngestError {
    fn from(source: csv::Error) -> Self {
        Self::Parse { source }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
