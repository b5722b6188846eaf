//! Character-indexed string helpers.
//!
//! Offsets in paths count Unicode scalar values, not bytes, so every slice of
//! a text run goes through these helpers.

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the `offset`-th character, clamped to the end of `s`.
pub fn byte_offset(s: &str, offset: usize) -> usize {
    s.char_indices()
        .nth(offset)
        .map(|(index, _)| index)
        .unwrap_or(s.len())
}

/// Substring between two character offsets, both clamped to `s`.
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    &s[from..to]
}

/// True for strings made only of whitespace (including the empty string).
pub fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
