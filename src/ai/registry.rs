//! Ordered (endpoint, model) candidates tried for every summary request.

use url::Url;

use crate::errors::SummaryError;

/// Known-good alternates tried after the configured primary, in order.
pub const FALLBACK_CANDIDATES: &[(&str, &str)] = &[
    ("https://api.deepseek.com/chat/completions", "deepseek-chat"),
    ("https://api.deepseek.com/v1/chat/completions", "deepseek-reasoner"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub endpoint_url: String,
    pub model_name: String,
}

impl Candidate {
    #[must_use]
    pub fn new(endpoint_url: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            model_name: model_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    candidates: Vec<Candidate>,
}

impl EndpointRegistry {
    /// Primary candidate first, then [`FALLBACK_CANDIDATES`] minus any
    /// duplicate of the primary.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Config` if the primary URL is not an absolute
    /// http(s) URL.
    pub fn with_primary(api_url: &str, model: &str) -> Result<Self, SummaryError> {
        let primary = Candidate::new(api_url.trim(), model.trim());
        let mut candidates = vec![primary];
        for (url, model) in FALLBACK_CANDIDATES {
            let candidate = Candidate::new(*url, *model);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        Self::from_candidates(candidates)
    }

    /// # Errors
    ///
    /// Returns `SummaryError::Config` if the list is empty or any URL is invalid.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Result<Self, SummaryError> {
        if candidates.is_empty() {
            return Err(SummaryError::Config(
                "at least one summary endpoint is required".to_string(),
            ));
        }
        for candidate in &candidates {
            let url = Url::parse(&candidate.endpoint_url)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(SummaryError::Config(format!(
                    "unsupported scheme for endpoint {}",
                    candidate.endpoint_url
                )));
            }
            if candidate.model_name.is_empty() {
                return Err(SummaryError::Config(format!(
                    "empty model name for endpoint {}",
                    candidate.endpoint_url
                )));
            }
        }
        Ok(Self { candidates })
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}
