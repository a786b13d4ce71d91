//! Remote summary client
//!
//! One HTTPS call to one candidate. Every failure is classified into a
//! [`SummaryError`] and returned; nothing escapes as a panic.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use super::payload::{ChatRequest, GenerationParams, classify_error_status, parse_chat_response};
use super::prompt::build_prompt;
use super::registry::Candidate;
use crate::core::config::TransportConfig;
use crate::errors::SummaryError;

/// Everything one remote call needs besides the candidate.
#[derive(Debug, Clone, Copy)]
pub struct SummaryCall<'a> {
    pub content: &'a str,
    pub max_length: usize,
    /// Escalated anti-repetition instruction and penalties.
    pub amplified: bool,
}

#[async_trait]
pub trait SummaryBackend: Send + Sync {
    async fn call(&self, candidate: &Candidate, call: &SummaryCall<'_>) -> Result<String, SummaryError>;
}

pub struct RemoteSummaryClient {
    http: Client,
    headers: HeaderMap,
}

impl RemoteSummaryClient {
    /// # Errors
    ///
    /// Returns `SummaryError::Config` if the API key is not a valid header
    /// value, the proxy is invalid, or the HTTP client cannot be built.
    pub fn new(config: &TransportConfig) -> Result<Self, SummaryError> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout);

        builder = match &config.proxy {
            Some((host, port)) => {
                let proxy = reqwest::Proxy::all(format!("http://{host}:{port}"))
                    .map_err(|e| SummaryError::Config(format!("invalid proxy {host}:{port}: {e}")))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let http = builder
            .build()
            .map_err(|e| SummaryError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            headers: auth_headers(&config.api_key)?,
        })
    }
}

fn auth_headers(api_key: &str) -> Result<HeaderMap, SummaryError> {
    let mut headers = HeaderMap::new();
    let auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|e| SummaryError::Config(format!("Invalid Authorization header: {e}")))?;
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[async_trait]
impl SummaryBackend for RemoteSummaryClient {
    async fn call(&self, candidate: &Candidate, call: &SummaryCall<'_>) -> Result<String, SummaryError> {
        let request = ChatRequest::new(
            &candidate.model_name,
            build_prompt(call.content, call.max_length, call.amplified),
            GenerationParams::for_budget(call.max_length, call.amplified),
        );

        #[cfg(feature = "debug-logs")]
        debug!("Summary request body: {:?}", request);

        let response = self
            .http
            .post(&candidate.endpoint_url)
            .headers(self.headers.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| SummaryError::Transport(format!("request to {} failed: {e}", candidate.endpoint_url)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SummaryError::Transport(format!("failed to read response body: {e}")))?;

        debug!(
            status = status.as_u16(),
            body_bytes = body.len(),
            model = %candidate.model_name,
            "Summary provider responded"
        );

        if !status.is_success() {
            return Err(classify_error_status(status.as_u16(), &body));
        }

        parse_chat_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builds_with_and_without_proxy() {
        let mut config = TransportConfig::new("sk-test");
        assert!(RemoteSummaryClient::new(&config).is_ok());

        config.proxy = Some(("127.0.0.1".to_string(), 7890));
        assert!(RemoteSummaryClient::new(&config).is_ok());
    }

    #[test]
    fn bearer_header_is_set() {
        let client = RemoteSummaryClient::new(&TransportConfig::new("sk-test")).unwrap();
        let headers = &client.headers;
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn control_characters_in_key_fail_at_construction() {
        let result = RemoteSummaryClient::new(&TransportConfig::new("bad\nkey"));
        assert!(matches!(result, Err(SummaryError::Config(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let mut config = TransportConfig::new("sk-test");
        config.connect_timeout = Duration::from_millis(200);
        config.read_timeout = Duration::from_millis(500);
        let client = RemoteSummaryClient::new(&config).unwrap();

        // Port 9 (discard) on localhost is closed in test environments.
        let candidate = Candidate::new("http://127.0.0.1:9/v1/chat/completions", "m");
        let call = SummaryCall {
            content: "content",
            max_length: 30,
            amplified: false,
        };
        let err = client.call(&candidate, &call).await.unwrap_err();
        assert!(matches!(err, SummaryError::Transport(_)), "got {err:?}");
    }
}
