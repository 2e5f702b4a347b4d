//! Category name normalization
//!
//! Upstream data sources label transactions with a loose (top, sub) pair.
//! Baselines group by a single display name built from that pair.

/// Name used when no usable category exists
pub const MISC_CATEGORY: &str = "Misc";

/// Canonicalize a raw (top, sub) category pair into one display name
///
/// The top category wins unless it is missing, blank, or "misc"; the sub
/// category is the fallback. The result is whitespace-collapsed and
/// title-cased, and is never blank.
pub fn normalize_category(top: Option<&str>, sub: Option<&str>) -> String {
    let chosen = match top.map(str::trim) {
        Some(t) if !t.is_empty() && !t.eq_ignore_ascii_case(MISC_CATEGORY) => Some(t),
        _ => sub.map(str::trim).filter(|s| !s.is_empty()),
    };

    match chosen {
        Some(raw) => title_case(raw),
        None => MISC_CATEGORY.to_string(),
    }
}

/// Collapse whitespace, lowercase, then uppercase the first letter of each word
fn title_case(raw: &str) -> String {
    let words: Vec<String> = raw
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        MISC_CATEGORY.to_string()
    } else {
        words.join(" ")
    }
}
