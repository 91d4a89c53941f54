//! Required-field checks for a finalized mapping.

use serde::{Deserialize, Serialize};

use maillist_model::{ColumnMapping, SystemHeader};

/// Outcome of checking a mapping against the catalog's required fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingValidation {
    /// Required fields that no column maps onto, in catalog order.
    pub missing: Vec<SystemHeader>,
}

impl MappingValidation {
    /// True when every required field is targeted by at least one column.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_names(&self) -> Vec<String> {
        self.missing.iter().map(|h| h.name.clone()).collect()
    }
}

/// Computes the required fields whose id does not appear among the mapping's values.
///
/// Pure and cheap; safe to call after every edit.
pub fn validate_mapping(mapping: &ColumnMapping, catalog: &[SystemHeader]) -> MappingValidation {
    let missing = catalog
        .iter()
        .filter(|header| header.is_required && !mapping.targets(&header.id))
        .cloned()
        .collect();
    MappingValidation { missing }
}
