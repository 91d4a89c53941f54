use thiserror::Error;

use maillist_csv::IngestError;
use maillist_map::MappingError;
use maillist_model::ModelError;
use maillist_store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} {id} belongs to another user")]
    NotOwner { kind: &'static str, id: String },

    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    /// Commit was attempted with required fields left unmapped.
    #[error("required fields are not mapped: {}", missing.join(", "))]
    IncompleteMapping { missing: Vec<String> },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
