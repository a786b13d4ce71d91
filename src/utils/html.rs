use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::core::text::collapse_whitespace;

/// Wide enough that html2text never wraps a paragraph.
const HTML_RENDER_WIDTH: usize = 10_000;

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9]*(?:\s[^<>]*)?/?>").expect("static regex compile"));

#[must_use]
pub fn looks_like_html(text: &str) -> bool {
    HTML_TAG.is_match(text)
}

/// Turn an editor body (HTML or plain text) into single-spaced plain text.
#[must_use]
pub fn normalize_content(raw: &str) -> String {
    if !looks_like_html(raw) {
        return collapse_whitespace(raw);
    }

    match html2text::from_read(raw.as_bytes(), HTML_RENDER_WIDTH) {
        Ok(text) => collapse_whitespace(&text),
        Err(e) => {
            warn!("Failed to render HTML content, using raw text: {}", e);
            collapse_whitespace(&HTML_TAG.replace_all(raw, " "))
        }
    }
}
