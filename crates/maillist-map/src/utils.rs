//! Utility functions for mapping operations.

/// Normalizes a header or field name for comparison.
///
/// Only trims surrounding whitespace and lowercases. Punctuation and inner
/// whitespace are kept as-is.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}
