use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("Failed to reach summary provider: {0}")]
    Transport(String),

    #[error("Unexpected response shape from summary provider: {0}")]
    MalformedResponse(String),

    #[error("Summary provider returned an error: {0}")]
    Provider(String),

    #[error("Summary rejected by validation: {0}")]
    Validation(String),

    #[error("Invalid summarizer configuration: {0}")]
    Config(String),
}

impl SummaryError {
    /// Stable label used in log fields and counters.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SummaryError::Transport(_) => "transport",
            SummaryError::MalformedResponse(_) => "malformed_response",
            SummaryError::Provider(_) => "provider",
            SummaryError::Validation(_) => "validation",
            SummaryError::Config(_) => "config",
        }
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SummaryError::MalformedResponse(error.to_string())
        } else {
            SummaryError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(error: serde_json::Error) -> Self {
        SummaryError::MalformedResponse(error.to_string())
    }
}

impl From<url::ParseError> for SummaryError {
    fn from(error: url::ParseError) -> Self {
        SummaryError::Config(format!("invalid endpoint URL: {error}"))
    }
}
