//! Logical-character helpers.
//!
//! Budgets are measured in user-perceived characters (extended grapheme
//! clusters), so a CJK ideograph, an emoji with modifiers, or a letter with a
//! combining accent each count as one.

use unicode_segmentation::UnicodeSegmentation;

#[must_use]
pub fn char_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Returns the longest prefix of `text` that is at most `max` logical characters.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.grapheme_indices(true).nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Collapse every whitespace run into a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[must_use]
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c as u32,
            0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x3040..=0x30FF | 0xAC00..=0xD7AF)
    })
}
