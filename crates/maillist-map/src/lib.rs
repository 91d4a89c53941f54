//! Column mapping for uploaded contact lists.
//!
//! Uploaded files arrive with arbitrary headers. This crate aligns them to the
//! system field catalog:
//!
//! - [`MappingEngine`] proposes a mapping by first-match-wins containment
//! - [`MappingState`] holds the mapping while a user overrides entries
//! - [`validate_mapping`] reports required fields that nothing maps onto

#![deny(unsafe_code)]

mod engine;
mod error;
mod state;
mod utils;
mod validate;

pub use engine::{MappingEngine, MappingResult, MappingSuggestion, MatchKind};
pub use error::{MappingError, Result};
pub use state::{DO_NOT_IMPORT, MappingState, MappingSummary};
pub use utils::normalize_text;
pub use validate::{MappingValidation, validate_mapping};
