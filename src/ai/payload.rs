//! Typed chat-completions request and response bodies.

use openai_api_rs::v1::chat_completion::ChatCompletionMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::text::truncate_chars;
use crate::errors::SummaryError;

const MIN_OUTPUT_TOKENS: usize = 64;
const MAX_OUTPUT_TOKENS: usize = 2048;
const ERROR_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl GenerationParams {
    /// Parameters for a `max_length` budget. `amplified` raises temperature and
    /// the repetition penalties for the anti-copy regeneration call.
    #[must_use]
    pub fn for_budget(max_length: usize, amplified: bool) -> Self {
        let max_tokens = max_length
            .saturating_mul(3)
            .clamp(MIN_OUTPUT_TOKENS, MAX_OUTPUT_TOKENS);
        let max_tokens = u32::try_from(max_tokens).unwrap_or(u32::MAX);

        if amplified {
            Self {
                max_tokens,
                temperature: 1.0,
                frequency_penalty: 1.5,
                presence_penalty: 1.0,
            }
        } else {
            Self {
                max_tokens,
                temperature: 0.5,
                frequency_penalty: 0.5,
                presence_penalty: 0.3,
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub stream: bool,
}

impl ChatRequest {
    #[must_use]
    pub fn new(model: &str, messages: Vec<ChatCompletionMessage>, params: GenerationParams) -> Self {
        Self {
            model: model.to_string(),
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    /// Legacy completions shape.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Pull the provider's message out of an `error` field, which may be an object
/// with `message` or a bare string.
fn error_message(error: &Value) -> Option<String> {
    match error {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or_else(|| Some(error.to_string())),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Extract the first generated message from a 2xx body.
///
/// # Errors
///
/// `Provider` if the body carries an error payload, `MalformedResponse` if it
/// is not JSON or has no usable first choice.
pub fn parse_chat_response(body: &str) -> Result<String, SummaryError> {
    let response: ChatResponse = serde_json::from_str(body)?;

    if let Some(message) = response.error.as_ref().and_then(error_message) {
        return Err(SummaryError::Provider(message));
    }

    let first = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| SummaryError::MalformedResponse("response has no choices".to_string()))?;

    first
        .message
        .and_then(|m| m.content)
        .or(first.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            SummaryError::MalformedResponse("first choice has no message content".to_string())
        })
}

/// Classify a non-2xx response.
#[must_use]
pub fn classify_error_status(status: u16, body: &str) -> SummaryError {
    let from_body = serde_json::from_str::<ChatResponse>(body)
        .ok()
        .and_then(|r| r.error.as_ref().and_then(error_message));

    match from_body {
        Some(message) => SummaryError::Provider(format!("status {status}: {message}")),
        None => SummaryError::Provider(format!(
            "status {status}: {}",
            truncate_chars(body.trim(), ERROR_EXCERPT_CHARS)
        )),
    }
}
