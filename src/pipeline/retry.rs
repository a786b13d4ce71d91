use std::time::Duration;

use tokio_retry::strategy::{ExponentialBackoff, FixedInterval, jitter};

const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// `base × r` before retry `r`.
    Linear,
    /// `base × 2^r` before retry `r`, capped.
    Exponential,
}

/// Per-candidate retry cap and the delay schedule between retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt on each candidate.
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub backoff: Backoff,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff_base: Duration::from_millis(500),
            backoff: Backoff::Linear,
            jitter: false,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn linear(max_retries: u32, backoff_base: Duration) -> Self {
        Self {
            max_retries,
            backoff_base,
            ..Self::default()
        }
    }

    /// Total attempts allowed per candidate, not counting a regeneration.
    #[must_use]
    pub fn attempts_per_candidate(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to sleep before retry `retry_index` (1-based). Zero for the first
    /// attempt or a zero base.
    #[must_use]
    pub fn delay_before(&self, retry_index: u32) -> Duration {
        if retry_index == 0 || self.backoff_base.is_zero() {
            return Duration::ZERO;
        }

        let steps = retry_index as usize;
        let delay = match self.backoff {
            Backoff::Linear => FixedInterval::new(self.backoff_base).take(steps).sum::<Duration>(),
            Backoff::Exponential => {
                let base_ms = u64::try_from(self.backoff_base.as_millis()).unwrap_or(u64::MAX);
                ExponentialBackoff::from_millis(2)
                    .factor(base_ms)
                    .max_delay(MAX_BACKOFF)
                    .nth(steps - 1)
                    .unwrap_or(MAX_BACKOFF)
            }
        };

        let delay = delay.min(MAX_BACKOFF);
        if self.jitter { jitter(delay) } else { delay }
    }
}
