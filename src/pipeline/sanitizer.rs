//! Lead-in and quote stripping for candidate summaries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anchored lead-in patterns, tried in this order; the first match is removed.
static LEAD_INS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(?:summary|summarized|tl;?dr|abstract)\s*[:：\-–—]\s*",
        r"(?i)^(?:here\s+is|here's)\s+(?:a|the)\s+(?:short\s+|brief\s+)?summary\s*[:：]?\s*",
        r"(?i)^(?:the|this)\s+(?:article|post|text|passage|blog(?:\s+post)?)\s+(?:states|says|discusses|describes|explains|argues|is\s+about)(?:\s+that)?\s*[:：,，]?\s*",
        r"(?i)^(?:in\s+brief|in\s+short|in\s+summary|briefly|to\s+summarize)\s*[:：,，]?\s*",
        r"^(?:摘要|总结|概要|概括|简介|内容摘要)\s*[:：]\s*",
        r"^(?:本文|这篇文章|该文章|这篇博客|文章)(?:主要)?(?:讲述|介绍|探讨|讨论|描述|阐述|讲)了?\s*[:：,，]?\s*",
        r"^(?:总之|简而言之|总的来说|简单来说|概括来说)\s*[:：,，]?\s*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex compile"))
    .collect()
});

const QUOTES: &[char] = &['"', '\'', '“', '”', '‘', '’', '「', '」', '『', '』', '`'];

fn strip_lead_in(text: &str) -> &str {
    for pattern in LEAD_INS.iter() {
        if let Some(m) = pattern.find(text) {
            return &text[m.end()..];
        }
    }
    text
}

fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(QUOTES).unwrap_or(text);
    text.strip_suffix(QUOTES).unwrap_or(text)
}

fn sanitize_once(text: &str) -> &str {
    let text = strip_lead_in(text.trim()).trim();
    strip_quotes(text).trim()
}

/// Trim, strip one lead-in phrase and one leading/trailing quote mark per
/// pass, repeating until nothing changes. `sanitize(sanitize(x)) == sanitize(x)`.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let mut current = text;
    loop {
        let next = sanitize_once(current);
        if next.len() == current.len() {
            return next.to_string();
        }
        current = next;
    }
}
