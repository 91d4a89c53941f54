//! Mapping engine implementation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use maillist_model::{ColumnMapping, FieldId, SystemHeader};

use crate::utils::normalize_text;

/// Which containment rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    /// Normalized header equals the normalized field name.
    Exact,
    /// Header contains the field name, e.g. "Email Address" / "Email".
    HeaderContainsField,
    /// Field name contains the header, e.g. "First" / "First Name".
    FieldContainsHeader,
}

impl MatchKind {
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Exact => "exact match",
            Self::HeaderContainsField => "column contains field name",
            Self::FieldContainsHeader => "field name contains column",
        }
    }
}

/// A proposed mapping from one source column to a catalog field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    /// Source column exactly as it appeared in the file.
    pub source_column: String,
    pub target_field: FieldId,
    /// Display name of the target field.
    pub field_name: String,
    pub kind: MatchKind,
}

/// Result of a mapping operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingResult {
    /// Suggestions in source column order.
    pub mappings: Vec<MappingSuggestion>,
    /// Columns no catalog field matched.
    pub unmapped_columns: Vec<String>,
}

impl MappingResult {
    /// Converts the suggestions into a [`ColumnMapping`].
    pub fn to_mapping(&self) -> ColumnMapping {
        self.mappings
            .iter()
            .map(|s| (s.source_column.clone(), s.target_field.clone()))
            .collect()
    }

    /// Returns the count of suggestions produced by each rule.
    #[must_use]
    pub fn count_by_kind(&self) -> BTreeMap<MatchKind, usize> {
        let mut counts = BTreeMap::new();
        for mapping in &self.mappings {
            *counts.entry(mapping.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Suggestions that did not come from an exact match.
    ///
    /// These are the ones worth a second look: a short field name such as
    /// "Name" can be contained in many unrelated headers.
    #[must_use]
    pub fn partial_matches(&self) -> Vec<&MappingSuggestion> {
        self.mappings
            .iter()
            .filter(|m| m.kind != MatchKind::Exact)
            .collect()
    }
}

/// Proposes a mapping from source columns to catalog fields.
///
/// Each column is compared against the catalog in iteration order and takes
/// the first field whose normalized name equals it, is contained in it, or
/// contains it. There is no scoring among candidates and no one-to-one
/// constraint: two columns may land on the same field.
///
/// # Example
///
/// ```ignore
/// use maillist_map::MappingEngine;
///
/// let engine = MappingEngine::new(catalog);
/// let result = engine.suggest(&["Email Address".to_string(), "First".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct MappingEngine {
    catalog: Vec<SystemHeader>,
    patterns: Vec<String>,
}

impl MappingEngine {
    /// Creates an engine over `catalog`. Catalog order decides ties.
    pub fn new(catalog: Vec<SystemHeader>) -> Self {
        let patterns = catalog.iter().map(|h| normalize_text(&h.name)).collect();
        Self { catalog, patterns }
    }

    pub fn catalog(&self) -> &[SystemHeader] {
        &self.catalog
    }

    /// Finds the first catalog field matching `column`.
    pub fn match_column(&self, column: &str) -> Option<(&SystemHeader, MatchKind)> {
        let normalized = normalize_text(column);
        self.catalog
            .iter()
            .zip(&self.patterns)
            .find_map(|(header, pattern)| {
                classify(&normalized, pattern).map(|kind| (header, kind))
            })
    }

    /// Suggests mappings for a list of source column names.
    pub fn suggest(&self, columns: &[String]) -> MappingResult {
        let mut result = MappingResult::default();
        for column in columns {
            match self.match_column(column) {
                Some((header, kind)) => {
                    debug!(
                        column = %column,
                        field = %header.id,
                        kind = kind.description(),
                        "auto-mapped column"
                    );
                    result.mappings.push(MappingSuggestion {
                        source_column: column.clone(),
                        target_field: header.id.clone(),
                        field_name: header.name.clone(),
                        kind,
                    });
                }
                None => result.unmapped_columns.push(column.clone()),
            }
        }
        result
    }
}

fn classify(column: &str, field: &str) -> Option<MatchKind> {
    if column == field {
        Some(MatchKind::Exact)
    } else if column.contains(field) {
        Some(MatchKind::HeaderContainsField)
    } else if field.contains(column) {
        Some(MatchKind::FieldContainsHeader)
    } else {
        None
    }
}
