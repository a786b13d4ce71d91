use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::errors::SummaryError;

/// Live failure/outcome counters, shared by every concurrent `summarize` call.
#[derive(Debug, Default)]
pub struct PipelineStats {
    transport_errors: AtomicU64,
    malformed_responses: AtomicU64,
    provider_errors: AtomicU64,
    validation_failures: AtomicU64,
    regenerations: AtomicU64,
    truncations: AtomicU64,
    remote_successes: AtomicU64,
    local_fallbacks: AtomicU64,
    deadline_expiries: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub transport_errors: u64,
    pub malformed_responses: u64,
    pub provider_errors: u64,
    pub validation_failures: u64,
    pub regenerations: u64,
    pub truncations: u64,
    pub remote_successes: u64,
    pub local_fallbacks: u64,
    pub deadline_expiries: u64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl PipelineStats {
    pub fn record_failure(&self, error: &SummaryError) {
        match error {
            SummaryError::Transport(_) => bump(&self.transport_errors),
            SummaryError::MalformedResponse(_) => bump(&self.malformed_responses),
            SummaryError::Provider(_) => bump(&self.provider_errors),
            SummaryError::Validation(_) => bump(&self.validation_failures),
            // Construction-time only; never produced by a call.
            SummaryError::Config(_) => {}
        }
    }

    pub fn record_regeneration(&self) {
        bump(&self.regenerations);
    }

    pub fn record_remote_success(&self, truncated: bool) {
        bump(&self.remote_successes);
        if truncated {
            bump(&self.truncations);
        }
    }

    pub fn record_local_fallback(&self) {
        bump(&self.local_fallbacks);
    }

    pub fn record_deadline_expiry(&self) {
        bump(&self.deadline_expiries);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            malformed_responses: self.malformed_responses.load(Ordering::Relaxed),
            provider_errors: self.provider_errors.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            regenerations: self.regenerations.load(Ordering::Relaxed),
            truncations: self.truncations.load(Ordering::Relaxed),
            remote_successes: self.remote_successes.load(Ordering::Relaxed),
            local_fallbacks: self.local_fallbacks.load(Ordering::Relaxed),
            deadline_expiries: self.deadline_expiries.load(Ordering::Relaxed),
        }
    }
}
