//! Deterministic, network-free summarizer used once every remote attempt is spent.

use std::cmp::Reverse;

use super::sanitizer::sanitize;
use crate::core::text::{char_len, contains_cjk, truncate_chars};

/// Returned when there is nothing to summarize.
pub const EMPTY_CONTENT_SENTINEL: &str = "内容为空，无法生成摘要";

const SENTENCE_TERMINALS: &[char] = &['.', '!', '?', '。', '！', '？', '．', '…'];
const SOFT_BOUNDARIES: &[char] = &[' ', ',', ';', ':', '，', '、', '；', '：', '\u{3000}'];

/// Length of the second-sentence excerpt used when no keyword matches.
const SECOND_EXCERPT_CHARS: usize = 10;
const MAX_KEYWORDS: usize = 2;

/// Topic vocabulary scanned for the connective clause. Entries are lowercase.
pub const TOPIC_KEYWORDS: &[&str] = &[
    // 心理与成长
    "自卑", "勇气", "成长", "焦虑", "孤独", "自由", "幸福", "梦想", "人生", "心理",
    // 关系
    "爱情", "友情", "家庭", "父母", "婚姻",
    // 文化
    "电影", "音乐", "阅读", "小说", "历史", "哲学", "艺术", "摄影", "旅行", "美食",
    // 技术与工作
    "技术", "编程", "前端", "后端", "数据库", "人工智能", "职场", "教育", "健康", "运动",
    "rust", "java", "python", "javascript", "database", "music", "movie", "film",
    "travel", "career", "programming", "design", "history", "philosophy",
];

fn split_sentences(content: &str) -> Vec<&str> {
    let fragments: Vec<&str> = content
        .split(SENTENCE_TERMINALS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if fragments.is_empty() {
        vec![content.trim()]
    } else {
        fragments
    }
}

/// Cut an over-long anchor at the last soft boundary before two thirds of the
/// budget, or hard-cut there if no boundary exists.
fn shorten_anchor(anchor: &str, max_length: usize) -> &str {
    let limit = (max_length * 2 / 3).max(1);
    if char_len(anchor) <= limit {
        return anchor;
    }

    let prefix = truncate_chars(anchor, limit);
    match prefix.rfind(SOFT_BOUNDARIES) {
        Some(idx) if !prefix[..idx].trim_end().is_empty() => prefix[..idx].trim_end(),
        _ => prefix,
    }
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offsets of `keyword` in `haystack`. ASCII keywords must stand as whole
/// words ("rust" does not hit "trust"); CJK keywords match anywhere.
fn keyword_hits(haystack: &str, keyword: &str) -> Vec<usize> {
    let hits = haystack.match_indices(keyword).map(|(idx, _)| idx);
    if !keyword.is_ascii() {
        return hits.collect();
    }

    hits.filter(|&idx| {
        let before = haystack[..idx].chars().next_back();
        let after = haystack[idx + keyword.len()..].chars().next();
        !before.is_some_and(is_ascii_word) && !after.is_some_and(is_ascii_word)
    })
    .collect()
}

/// Present keywords ordered by descending count, ties by first occurrence.
#[must_use]
pub fn rank_keywords(content: &str) -> Vec<&'static str> {
    let haystack = content.to_lowercase();
    let mut present: Vec<(&'static str, usize, usize)> = TOPIC_KEYWORDS
        .iter()
        .filter_map(|&keyword| {
            let hits = keyword_hits(&haystack, keyword);
            let first = *hits.first()?;
            Some((keyword, hits.len(), first))
        })
        .collect();

    present.sort_by_key(|&(_, count, first)| (Reverse(count), first));
    present.into_iter().map(|(keyword, _, _)| keyword).collect()
}

fn keyword_clause(keywords: &[&str], cjk: bool) -> String {
    match (keywords, cjk) {
        ([only], true) => format!("，涉及{only}"),
        ([first, second, ..], true) => format!("，涉及{first}与{second}"),
        ([only], false) => format!(" — touching on {only}"),
        ([first, second, ..], false) => format!(" — touching on {first} and {second}"),
        ([], _) => String::new(),
    }
}

/// Build a summary of at most `max_length` logical characters from `content`
/// alone. Total and pure: identical input always gives identical output.
#[must_use]
pub fn summarize_locally(content: &str, max_length: usize) -> String {
    let max_length = max_length.max(1);
    let content = content.trim();
    if content.is_empty() {
        return truncate_chars(EMPTY_CONTENT_SENTINEL, max_length).to_string();
    }

    let sentences = split_sentences(content);
    let anchor = shorten_anchor(sentences[0], max_length);
    let cjk = contains_cjk(content);

    let keywords = rank_keywords(content);
    let mut composed = anchor.to_string();
    if keywords.is_empty() {
        if let Some(second) = sentences.get(1) {
            let excerpt = truncate_chars(second, SECOND_EXCERPT_CHARS).trim_end();
            composed.push_str(if cjk { "，" } else { "; " });
            composed.push_str(excerpt);
        }
    } else {
        let top = &keywords[..keywords.len().min(MAX_KEYWORDS)];
        composed.push_str(&keyword_clause(top, cjk));
    }

    let result = truncate_chars(&composed, max_length).trim_end();
    if result.is_empty() {
        truncate_chars(content, max_length).to_string()
    } else {
        result.to_string()
    }
}

/// The local path as callers see it: [`summarize_locally`] followed by
/// sanitizing, keeping the unsanitized text if sanitizing would empty it.
#[must_use]
pub fn local_summary(content: &str, max_length: usize) -> String {
    let local = summarize_locally(content, max_length);
    let cleaned = sanitize(&local);
    if cleaned.is_empty() { local } else { cleaned }
}
