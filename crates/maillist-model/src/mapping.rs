use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::FieldId;

/// Mapping from original file headers (case-preserved) to catalog field ids.
///
/// A header absent from the mapping is not imported. Several headers may
/// target the same field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<String, FieldId>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, header: &str) -> Option<&FieldId> {
        self.0.get(header)
    }

    /// Inserts or overwrites the target of a single header.
    pub fn insert(&mut self, header: impl Into<String>, field: FieldId) -> Option<FieldId> {
        self.0.insert(header.into(), field)
    }

    pub fn remove(&mut self, header: &str) -> Option<FieldId> {
        self.0.remove(header)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldId)> {
        self.0.iter().map(|(header, field)| (header.as_str(), field))
    }

    /// True if any header targets `field`.
    pub fn targets(&self, field: &FieldId) -> bool {
        self.0.values().any(|value| value == field)
    }

    /// Distinct target ids, in the order their headers appear in `headers`.
    ///
    /// Headers not present in `headers` are appended afterwards in key order.
    pub fn targets_in_order(&self, headers: &[String]) -> Vec<FieldId> {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();
        let known = headers.iter().filter_map(|h| self.0.get_key_value(h.as_str()));
        let rest = self
            .0
            .iter()
            .filter(|(header, _)| !headers.iter().any(|h| h == *header));
        for (_, field) in known.chain(rest) {
            if seen.insert(field.clone()) {
                ordered.push(field.clone());
            }
        }
        ordered
    }
}

impl FromIterator<(String, FieldId)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (String, FieldId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
