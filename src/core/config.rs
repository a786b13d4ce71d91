use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::core::models::DEFAULT_MAX_LENGTH;
use crate::errors::SummaryError;

pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Outbound HTTP settings for the remote client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub api_key: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Explicit proxy as `(host, port)`. Ambient proxy variables are ignored.
    pub proxy: Option<(String, u16)>,
}

impl TransportConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            proxy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub transport: TransportConfig,
    pub api_url: String,
    pub model: String,
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub default_max_length: usize,
    pub default_deadline: Duration,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `SummaryError::Config` when the API key is missing or a numeric
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self, SummaryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source. `from_env` delegates here.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SummaryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("SUMMARY_API_KEY")
            .or_else(|| lookup("DEEPSEEK_API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SummaryError::Config("SUMMARY_API_KEY is not set".to_string()))?;

        let proxy = match lookup("SUMMARY_PROXY_HOST").filter(|h| !h.trim().is_empty()) {
            Some(host) => {
                let port = parse_or(&lookup, "SUMMARY_PROXY_PORT", 8080u16)?;
                Some((host.trim().to_string(), port))
            }
            None => None,
        };

        let transport = TransportConfig {
            api_key,
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SUMMARY_CONNECT_TIMEOUT_SECS",
                10u64,
            )?),
            read_timeout: Duration::from_secs(parse_or(&lookup, "SUMMARY_READ_TIMEOUT_SECS", 30u64)?),
            proxy,
        };

        let default_max_length = default_max_length(&lookup)?;

        Ok(Self {
            transport,
            api_url: lookup("SUMMARY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: lookup("SUMMARY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_retries: parse_or(&lookup, "SUMMARY_MAX_RETRIES", 2u32)?,
            backoff_base: Duration::from_millis(parse_or(&lookup, "SUMMARY_BACKOFF_MS", 500u64)?),
            default_max_length,
            default_deadline: Duration::from_secs(parse_or(&lookup, "SUMMARY_DEADLINE_SECS", 60u64)?),
        })
    }
}

/// `SUMMARY_DEFAULT_MAX_LENGTH` on its own, for paths that never need an API key.
///
/// # Errors
///
/// Returns `SummaryError::Config` if the value is not a positive integer.
pub fn default_max_length_from_env() -> Result<usize, SummaryError> {
    default_max_length(&|key: &str| env::var(key).ok())
}

/// # Errors
///
/// See [`default_max_length_from_env`].
pub fn default_max_length<F>(lookup: &F) -> Result<usize, SummaryError>
where
    F: Fn(&str) -> Option<String>,
{
    let max_length: usize = parse_or(lookup, "SUMMARY_DEFAULT_MAX_LENGTH", DEFAULT_MAX_LENGTH)?;
    if max_length == 0 {
        return Err(SummaryError::Config(
            "SUMMARY_DEFAULT_MAX_LENGTH must be at least 1".to_string(),
        ));
    }
    Ok(max_length)
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, SummaryError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| SummaryError::Config(format!("{key}: {e}"))),
        _ => Ok(default),
    }
}
