//! Job title normalization.

/// Seniority and role-level tokens removed from the end of a title. Checked in
/// this order; only the first match is stripped.
const SUFFIXES: &[&str] = &[
    " i",
    " ii",
    " iii",
    " iv",
    " v",
    " specialist",
    " assistant",
    " associate",
    " senior",
    " junior",
    " lead",
];

/// Lower-cases and trims `title`, then strips at most one trailing suffix
/// token. Whitespace left in front of a stripped suffix is trimmed too.
pub fn normalize_title(title: &str) -> String {
    let normalized = title.to_lowercase();
    let normalized = normalized.trim();

    for suffix in SUFFIXES {
        if let Some(stripped) = normalized.strip_suffix(suffix) {
            return stripped.trim_end().to_string();
        }
    }

    normalized.to_string()
}
