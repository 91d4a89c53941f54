//! System field catalog.

use serde::{Deserialize, Serialize};

use crate::FieldId;

/// A canonical field that uploaded columns can be mapped onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemHeader {
    /// Stable identifier, unique across the catalog.
    pub id: FieldId,
    /// Human-readable label (e.g. "Email"). Used for matching and display only.
    pub name: String,
    /// Whether every upload must map a column onto this field.
    pub is_required: bool,
}

impl SystemHeader {
    pub fn new(id: FieldId, name: impl Into<String>, is_required: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_required,
        }
    }

    /// Builds a header whose id is the slug of its name.
    ///
    /// Returns `None` when the name has no alphanumeric characters.
    pub fn from_name(name: &str, is_required: bool) -> Option<Self> {
        let id = FieldId::new(field_slug(name)).ok()?;
        Some(Self::new(id, name.trim(), is_required))
    }
}

const DEFAULT_FIELDS: [(&str, bool); 11] = [
    ("Email", true),
    ("First Name", false),
    ("Last Name", false),
    ("Phone", false),
    ("Address", false),
    ("City", false),
    ("State", false),
    ("Zip", false),
    ("Country", false),
    ("Company", false),
    ("Job Title", false),
];

/// The catalog seeded on first initialization. `Email` is the only required field.
pub fn default_catalog() -> Vec<SystemHeader> {
    DEFAULT_FIELDS
        .iter()
        .filter_map(|(name, required)| SystemHeader::from_name(name, *required))
        .collect()
}

/// Lowercases a display name and joins its alphanumeric runs with `_`.
///
/// `"Job Title"` becomes `"job_title"`.
pub fn field_slug(name: &str) -> String {
    name.split(|ch: char| !ch.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
