//! Tag input normalisation.

/// Splits a comma-separated tag string into trimmed, non-empty tags.
///
/// Order is preserved and repeated tags are kept.
///
/// ```
/// use sprintboard::notes::domain::parse_tags;
///
/// assert_eq!(parse_tags("a, b ,, c"), vec!["a", "b", "c"]);
/// ```
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}
