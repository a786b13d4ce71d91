//! Summarization pipeline: sanitize, validate, retry, fall back.

pub mod fallback;
pub mod orchestrator;
pub mod retry;
pub mod sanitizer;
pub mod stats;
pub mod validator;

pub use fallback::{EMPTY_CONTENT_SENTINEL, local_summary, summarize_locally};
pub use orchestrator::Summarizer;
pub use retry::{Backoff, RetryPolicy};
pub use sanitizer::sanitize;
pub use stats::StatsSnapshot;
pub use validator::{ValidationOutcome, Verdict, validate};
