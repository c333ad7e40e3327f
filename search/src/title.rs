//! Title normalization.
//!
//! Normalized titles are used only for equality (goal detection, dedup).
//! Providers are always queried with the original casing.

/// Normalize a title for comparisons: trim surrounding whitespace, lowercase.
#[must_use]
pub fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Compare two titles after normalization.
#[must_use]
pub fn same_title(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
