use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{kind} id must not be empty")]
    EmptyId { kind: &'static str },
    #[error("unknown filter operator '{0}'")]
    UnknownOperator(String),
    #[error("invalid filter condition '{input}': expected field:operator:value")]
    InvalidCondition { input: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
