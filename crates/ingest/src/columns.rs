//! Header normalization.

/// Substrings that mark a column as holding timestamps.
const DATE_MARKERS: [&str; 3] = ["date", "created", "updated"];

/// Normalize a raw header field into a column name.
///
/// Trims surrounding whitespace, lower-cases, and replaces spaces and hyphens
/// with underscores. `" Created-At "` becomes `"created_at"`.
#[must_use]
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Whether a normalized column name should be coerced to timestamps.
#[must_use]
pub fn is_date_column(normalized: &str) -> bool {
    DATE_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}
