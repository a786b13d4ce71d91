//! Summary orchestrator
//!
//! Walks the candidate list with retries and backoff, validates each remote
//! answer, and falls back to the local summarizer once candidates or the
//! deadline run out. `summarize` always produces a non-empty summary within
//! the requested budget.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep, timeout};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use super::fallback::local_summary;
use super::retry::RetryPolicy;
use super::sanitizer::sanitize;
use super::stats::{PipelineStats, StatsSnapshot};
use super::validator::{Verdict, validate};
use crate::ai::{Candidate, EndpointRegistry, RemoteSummaryClient, SummaryBackend, SummaryCall};
use crate::core::config::AppConfig;
use crate::core::models::{DEFAULT_MAX_LENGTH, SummaryRequest, SummaryResult, SummarySource};
use crate::core::text::char_len;
use crate::errors::SummaryError;
use crate::utils::html::normalize_content;

const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

/// One remote call and what came of it.
#[derive(Debug)]
struct RemoteAttempt<'a> {
    candidate: &'a Candidate,
    retry_index: u32,
    amplified: bool,
    outcome: Result<String, SummaryError>,
}

/// What the orchestrator does after judging one remote answer.
enum Step {
    Done { text: String, truncated: bool },
    Regenerate,
    Failed(SummaryError),
}

pub struct Summarizer {
    registry: EndpointRegistry,
    backend: Arc<dyn SummaryBackend>,
    policy: RetryPolicy,
    default_max_length: usize,
    default_deadline: Duration,
    stats: Arc<PipelineStats>,
}

impl Summarizer {
    #[must_use]
    pub fn new(registry: EndpointRegistry, backend: Arc<dyn SummaryBackend>, policy: RetryPolicy) -> Self {
        Self {
            registry,
            backend,
            policy,
            default_max_length: DEFAULT_MAX_LENGTH,
            default_deadline: DEFAULT_DEADLINE,
            stats: Arc::new(PipelineStats::default()),
        }
    }

    /// Wire up the registry, HTTP client and retry policy from configuration.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Config` for an invalid endpoint or proxy.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummaryError> {
        let registry = EndpointRegistry::with_primary(&config.api_url, &config.model)?;
        let backend = RemoteSummaryClient::new(&config.transport)?;
        let policy = RetryPolicy::linear(config.max_retries, config.backoff_base);

        Ok(Self::new(registry, Arc::new(backend), policy)
            .with_default_max_length(config.default_max_length)
            .with_default_deadline(config.default_deadline))
    }

    #[must_use]
    pub fn with_default_max_length(mut self, max_length: usize) -> Self {
        self.default_max_length = max_length.max(1);
        self
    }

    #[must_use]
    pub fn with_default_deadline(mut self, deadline: Duration) -> Self {
        self.default_deadline = deadline;
        self
    }

    #[must_use]
    pub fn default_max_length(&self) -> usize {
        self.default_max_length
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Caller-facing entry point: content in, summary string out. Never fails.
    pub async fn summarize_text(
        &self,
        content: &str,
        max_length: Option<usize>,
        deadline: Option<Duration>,
    ) -> String {
        let request = SummaryRequest::new(content, max_length.unwrap_or(self.default_max_length));
        self.summarize(request, deadline.unwrap_or(self.default_deadline))
            .await
            .text
    }

    pub async fn summarize(&self, request: SummaryRequest, deadline: Duration) -> SummaryResult {
        let span = info_span!(
            "summarize",
            request_id = %Uuid::new_v4(),
            max_length = request.max_length
        );
        self.run(request, deadline).instrument(span).await
    }

    async fn run(&self, request: SummaryRequest, deadline: Duration) -> SummaryResult {
        let max_length = request.max_length.max(1);
        let content = normalize_content(&request.content);

        if content.is_empty() {
            info!("Content is empty; skipping remote summary");
            return self.fallback(&content, max_length, 0);
        }

        info!(
            content_chars = char_len(&content),
            candidates = self.registry.candidates().len(),
            "Starting summary pipeline"
        );

        let expires_at = Instant::now()
            .checked_add(deadline)
            .unwrap_or_else(|| Instant::now() + Duration::from_secs(60 * 60 * 24 * 365));
        let mut history: Vec<RemoteAttempt<'_>> = Vec::new();

        'candidates: for candidate in self.registry.candidates() {
            let mut attempts_used: u32 = 0;
            let mut regenerated = false;
            let mut amplified = false;

            loop {
                if !amplified && attempts_used > 0 {
                    let delay = self.policy.delay_before(attempts_used);
                    if !delay.is_zero() {
                        if expires_at.saturating_duration_since(Instant::now()) <= delay {
                            self.deadline_expired(history.len());
                            break 'candidates;
                        }
                        debug!(delay_ms = delay.as_millis() as u64, "Backing off before retry");
                        sleep(delay).await;
                    }
                }

                let remaining = expires_at.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    self.deadline_expired(history.len());
                    break 'candidates;
                }

                info!(
                    model = %candidate.model_name,
                    endpoint = %candidate.endpoint_url,
                    retry_index = attempts_used,
                    amplified,
                    "Requesting remote summary"
                );

                let call = SummaryCall {
                    content: &content,
                    max_length,
                    amplified,
                };
                let outcome = timeout(remaining, self.backend.call(candidate, &call))
                    .await
                    .unwrap_or_else(|_| {
                        Err(SummaryError::Transport(
                            "deadline elapsed while waiting for provider".to_string(),
                        ))
                    });

                let step = match &outcome {
                    Ok(raw) => self.judge(raw, &content, max_length, regenerated),
                    Err(e) => Step::Failed(e.clone()),
                };

                history.push(RemoteAttempt {
                    candidate,
                    retry_index: attempts_used,
                    amplified,
                    outcome,
                });
                if !amplified {
                    attempts_used += 1;
                }
                amplified = false;

                match step {
                    Step::Done { text, truncated } => {
                        self.stats.record_remote_success(truncated);
                        info!(
                            model = %candidate.model_name,
                            summary_chars = char_len(&text),
                            truncated,
                            attempts = history.len(),
                            "Remote summary accepted"
                        );
                        return SummaryResult {
                            text,
                            source: SummarySource::Remote { truncated },
                            remote_attempts: history.len(),
                        };
                    }
                    Step::Regenerate => {
                        regenerated = true;
                        amplified = true;
                        self.stats.record_regeneration();
                        info!(
                            model = %candidate.model_name,
                            "Summary copied the source verbatim; regenerating once"
                        );
                    }
                    Step::Failed(error) => {
                        self.stats.record_failure(&error);
                        warn!(
                            kind = error.kind(),
                            model = %candidate.model_name,
                            retry_index = attempts_used.saturating_sub(1),
                            "Remote summary attempt failed: {}",
                            error
                        );
                        if attempts_used >= self.policy.attempts_per_candidate() {
                            continue 'candidates;
                        }
                    }
                }
            }
        }

        let trail: Vec<(&str, u32, bool, Option<&'static str>)> = history
            .iter()
            .map(|a| {
                let failure = a.outcome.as_ref().err().map(SummaryError::kind);
                (a.candidate.model_name.as_str(), a.retry_index, a.amplified, failure)
            })
            .collect();
        debug!(attempts = ?trail, "Remote attempts exhausted");
        self.fallback(&content, max_length, history.len())
    }

    fn judge(&self, raw: &str, content: &str, max_length: usize, regenerated: bool) -> Step {
        let cleaned = sanitize(raw);
        let outcome = validate(&cleaned, content, max_length);
        match outcome.verdict {
            Verdict::Accept => Step::Done {
                text: outcome.text,
                truncated: false,
            },
            Verdict::Truncate => Step::Done {
                text: outcome.text,
                truncated: true,
            },
            Verdict::RegenerateOnce if !regenerated => Step::Regenerate,
            Verdict::RegenerateOnce => Step::Failed(SummaryError::Validation(
                "summary copies the source verbatim".to_string(),
            )),
            Verdict::Reject => Step::Failed(SummaryError::Validation(
                "summary is empty after sanitizing".to_string(),
            )),
        }
    }

    fn deadline_expired(&self, attempts: usize) {
        self.stats.record_deadline_expiry();
        warn!(attempts, "Summary deadline reached; abandoning remote attempts");
    }

    fn fallback(&self, content: &str, max_length: usize, remote_attempts: usize) -> SummaryResult {
        self.stats.record_local_fallback();
        let text = local_summary(content, max_length);

        info!(
            summary_chars = char_len(&text),
            remote_attempts,
            "Using local fallback summary"
        );

        SummaryResult {
            text,
            source: SummarySource::Local,
            remote_attempts,
        }
    }
}
