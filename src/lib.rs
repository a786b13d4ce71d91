/// Summarizer - short, budgeted summaries of blog content from an unreliable LLM provider.
///
/// A request walks an ordered list of (endpoint, model) candidates with
/// per-candidate retries and backoff. Each answer is sanitized, then checked for
/// verbatim copying and length. When every candidate is exhausted or the deadline
/// passes, a deterministic local summarizer takes over, so callers always get a
/// string back.
///
/// # Architecture
///
/// - `ai` — endpoint registry, typed chat payloads, and the reqwest-based remote client
/// - `pipeline` — sanitizer, validator, retry policy, local fallback, orchestrator
/// - `core` — configuration, request/result models, logical-character helpers
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use summarizer::core::config::AppConfig;
/// use summarizer::pipeline::Summarizer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     summarizer::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let summarizer = Summarizer::from_config(&config)?;
///
///     let summary = summarizer
///         .summarize_text("阿德勒认为，自卑感本身并不是病。", Some(30), Some(Duration::from_secs(20)))
///         .await;
///     println!("{summary}");
///     Ok(())
/// }
/// ```
pub mod ai;
pub mod core;
pub mod errors;
pub mod pipeline;
pub mod utils;

pub use crate::core::models::{SummaryRequest, SummaryResult, SummarySource};
pub use errors::SummaryError;
pub use pipeline::Summarizer;

/// Configure structured JSON logging.
///
/// Honors `RUST_LOG` and defaults to `info`. Calling it again after a
/// subscriber is installed is a no-op.
///
/// # Example
///
/// ```
/// summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
