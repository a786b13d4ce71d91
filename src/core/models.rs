use serde::Serialize;

/// Summary budget used when the caller does not supply one.
pub const DEFAULT_MAX_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub content: String,
    /// Budget in logical characters, never below 1.
    pub max_length: usize,
}

impl SummaryRequest {
    #[must_use]
    pub fn new(content: impl Into<String>, max_length: usize) -> Self {
        Self {
            content: content.into(),
            max_length: max_length.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    Remote { truncated: bool },
    Local,
}

impl SummarySource {
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, SummarySource::Remote { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    pub text: String,
    pub source: SummarySource,
    /// Remote calls actually issued while producing this result.
    pub remote_attempts: usize,
}
