// crates/geocity-core/src/text.rs

//! Text normalization helpers shared by the indexes and the scorer.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Queries longer than this are truncated before any processing.
pub const MAX_QUERY_CHARS: usize = 256;

/// Unicode-aware lowercasing.
///
/// This is the canonical key form of the name index: every index key equals
/// `lower(key)`.
pub fn lower(s: &str) -> String {
    s.to_lowercase()
}

/// Accent-insensitive, case-insensitive folding: NFD-decompose, drop
/// combining marks, lowercase.
///
/// `fold_key("Łódź")` and `fold_key("lodz")` do not agree for the stroked
/// "Ł" (it is not a base letter + combining mark), but `fold_key("São
/// Paulo") == "sao paulo"` and `fold_key("München") == "munchen"`, which is
/// what the scorer needs for its diacritic-stripped equality rule.
pub fn fold_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Collapse whitespace runs to single spaces, trim, and truncate the
/// result to [`MAX_QUERY_CHARS`] Unicode scalar values. Collapsing happens
/// first so that leading whitespace cannot eat into the truncation window.
pub fn normalize_query(q: &str) -> String {
    let collapsed = q.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_QUERY_CHARS {
        return collapsed;
    }
    collapsed.chars().take(MAX_QUERY_CHARS).collect()
}
