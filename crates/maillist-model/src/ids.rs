//! Opaque string identifiers.
//!
//! Every entity is keyed by a trimmed, non-empty string. Freshly created
//! entities get a random UUID; catalog fields use stable slugs instead.

use std::fmt;

use crate::ModelError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::EmptyId { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Creates a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(CampaignId, "campaign");
string_id!(ListId, "list");
string_id!(RecordId, "record");
string_id!(SegmentId, "segment");
string_id!(UserId, "user");
string_id!(
    /// Identifier of a catalog field. Used as the join key between mappings
    /// and record data; never derived from the display name at lookup time.
    FieldId,
    "field"
);
