//! Mapping state for the review step of an upload.
//!
//! A [`MappingState`] starts from either a caller-supplied mapping or the
//! engine's suggestions, then accepts manual overrides until the caller
//! freezes it with [`MappingState::into_mapping`].

use tracing::debug;

use maillist_model::{ColumnMapping, FieldId, SystemHeader};

use crate::engine::MappingEngine;
use crate::error::{MappingError, Result};
use crate::validate::{MappingValidation, validate_mapping};

/// Target value meaning "do not import this column".
pub const DO_NOT_IMPORT: &str = "";

/// Mapping under review for one uploaded file.
#[derive(Debug, Clone)]
pub struct MappingState {
    file_headers: Vec<String>,
    catalog: Vec<SystemHeader>,
    mapping: ColumnMapping,
    auto_mapped: bool,
}

impl MappingState {
    /// Creates the state for `file_headers`.
    ///
    /// Auto-mapping runs only when `initial` is `None` or empty; otherwise the
    /// supplied mapping is used verbatim.
    pub fn new(
        file_headers: Vec<String>,
        catalog: Vec<SystemHeader>,
        initial: Option<ColumnMapping>,
    ) -> Self {
        match initial {
            Some(mapping) if !mapping.is_empty() => Self {
                file_headers,
                catalog,
                mapping,
                auto_mapped: false,
            },
            _ => {
                let engine = MappingEngine::new(catalog);
                let mapping = engine.suggest(&file_headers).to_mapping();
                debug!(
                    columns = file_headers.len(),
                    mapped = mapping.len(),
                    "auto-mapping complete"
                );
                Self {
                    file_headers,
                    catalog: engine.catalog().to_vec(),
                    mapping,
                    auto_mapped: true,
                }
            }
        }
    }

    /// Creates the state for `file_headers` with every column left unmapped.
    pub fn manual(file_headers: Vec<String>, catalog: Vec<SystemHeader>) -> Self {
        Self {
            file_headers,
            catalog,
            mapping: ColumnMapping::new(),
            auto_mapped: false,
        }
    }

    /// True if the current mapping started from engine suggestions.
    pub fn is_auto_mapped(&self) -> bool {
        self.auto_mapped
    }

    pub fn file_headers(&self) -> &[String] {
        &self.file_headers
    }

    pub fn catalog(&self) -> &[SystemHeader] {
        &self.catalog
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Sets the target of one column.
    ///
    /// [`DO_NOT_IMPORT`] removes the column from the mapping; any catalog id
    /// inserts or overwrites it. Several columns may share a target.
    pub fn assign(&mut self, column: &str, target: &str) -> Result<()> {
        if !self.file_headers.iter().any(|h| h == column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        if target == DO_NOT_IMPORT {
            self.mapping.remove(column);
            return Ok(());
        }
        let field = self
            .catalog
            .iter()
            .find(|h| h.id.as_str() == target)
            .map(|h| h.id.clone())
            .ok_or_else(|| MappingError::FieldNotFound(target.to_string()))?;
        self.mapping.insert(column, field);
        Ok(())
    }

    /// Excludes a column from import. Returns true if it was mapped.
    pub fn clear(&mut self, column: &str) -> bool {
        self.mapping.remove(column).is_some()
    }

    /// Catalog entry a column currently maps onto.
    pub fn target_of(&self, column: &str) -> Option<&SystemHeader> {
        let field = self.mapping.get(column)?;
        self.catalog.iter().find(|h| &h.id == field)
    }

    /// Columns currently targeting `field`, in file order.
    pub fn columns_for(&self, field: &FieldId) -> Vec<&str> {
        self.file_headers
            .iter()
            .filter(|h| self.mapping.get(h) == Some(field))
            .map(String::as_str)
            .collect()
    }

    /// File columns with no target, in file order.
    pub fn unmapped_columns(&self) -> Vec<&str> {
        self.file_headers
            .iter()
            .filter(|h| self.mapping.get(h).is_none())
            .map(String::as_str)
            .collect()
    }

    pub fn validation(&self) -> MappingValidation {
        validate_mapping(&self.mapping, &self.catalog)
    }

    pub fn summary(&self) -> MappingSummary {
        let required: Vec<&SystemHeader> = self.catalog.iter().filter(|h| h.is_required).collect();
        MappingSummary {
            total_columns: self.file_headers.len(),
            mapped: self
                .file_headers
                .iter()
                .filter(|h| self.mapping.get(h).is_some())
                .count(),
            unmapped: self.unmapped_columns().len(),
            required_total: required.len(),
            required_mapped: required
                .iter()
                .filter(|h| self.mapping.targets(&h.id))
                .count(),
        }
    }

    /// Freezes the mapping.
    pub fn into_mapping(self) -> ColumnMapping {
        self.mapping
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    /// Number of columns in the file.
    pub total_columns: usize,
    /// Columns with a target.
    pub mapped: usize,
    /// Columns that will not be imported.
    pub unmapped: usize,
    /// Required fields in the catalog.
    pub required_total: usize,
    /// Required fields targeted by at least one column.
    pub required_mapped: usize,
}
