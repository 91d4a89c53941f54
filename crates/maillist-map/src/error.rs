//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Header is not one of the uploaded file's columns.
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    /// Target id is not part of the catalog.
    #[error("system field not found: {0}")]
    FieldNotFound(String),
}

pub type Result<T> = std::result::Result<T, MappingError>;
