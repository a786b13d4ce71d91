//! Copy and length checks for a sanitized remote summary.

use crate::core::text::{char_len, truncate_chars};

/// A summary longer than this that appears verbatim in the source is treated
/// as copy/paste rather than a short quoted term.
pub const VERBATIM_COPY_MIN_CHARS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    RegenerateOnce,
    Truncate,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub verdict: Verdict,
    /// For `Truncate`, already cut to exactly the budget.
    pub text: String,
}

#[must_use]
pub fn is_verbatim_copy(summary: &str, original: &str) -> bool {
    char_len(summary) > VERBATIM_COPY_MIN_CHARS && original.contains(summary)
}

#[must_use]
pub fn validate(summary: &str, original: &str, max_length: usize) -> ValidationOutcome {
    if summary.trim().is_empty() {
        return ValidationOutcome {
            verdict: Verdict::Reject,
            text: String::new(),
        };
    }

    if is_verbatim_copy(summary, original) {
        return ValidationOutcome {
            verdict: Verdict::RegenerateOnce,
            text: summary.to_string(),
        };
    }

    if char_len(summary) > max_length {
        return ValidationOutcome {
            verdict: Verdict::Truncate,
            text: truncate_chars(summary, max_length).to_string(),
        };
    }

    ValidationOutcome {
        verdict: Verdict::Accept,
        text: summary.to_string(),
    }
}
