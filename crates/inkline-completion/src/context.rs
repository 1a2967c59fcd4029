//! Bounded context windows around the cursor
//!
//! Offsets and limits are measured in characters, matching what the editor
//! reports. Both functions are pure and bounds-safe: limits larger than the
//! available text simply yield the full available text.

/// The document text before the cursor, keeping at most `max_prefix`
/// trailing characters (the characters closest to the cursor; older context
/// is dropped first).
pub fn truncated_prefix(text: &str, offset: usize, max_prefix: usize) -> String {
    let before: Vec<char> = text.chars().take(offset).collect();
    let start = before.len().saturating_sub(max_prefix);
    before[start..].iter().collect()
}

/// The document text after the cursor, keeping at most `max_suffix` leading
/// characters.
pub fn truncated_suffix(text: &str, offset: usize, max_suffix: usize) -> String {
    text.chars().skip(offset).take(max_suffix).collect()
}
