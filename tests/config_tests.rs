use std::collections::HashMap;
use std::time::Duration;

use summarizer::Summarizer;
use summarizer::core::config::{AppConfig, DEFAULT_API_URL, DEFAULT_MODEL, default_max_length};
use summarizer::errors::SummaryError;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_apply_when_only_key_is_set() {
    let config = AppConfig::from_lookup(lookup(&[("SUMMARY_API_KEY", "sk-test")])).unwrap();

    assert_eq!(config.transport.api_key, "sk-test");
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.transport.connect_timeout, Duration::from_secs(10));
    assert_eq!(config.transport.read_timeout, Duration::from_secs(30));
    assert_eq!(config.transport.proxy, None);
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.backoff_base, Duration::from_millis(500));
    assert_eq!(config.default_max_length, 30);
    assert_eq!(config.default_deadline, Duration::from_secs(60));
}

#[test]
fn test_legacy_key_name_is_accepted() {
    let config = AppConfig::from_lookup(lookup(&[("DEEPSEEK_API_KEY", "sk-legacy")])).unwrap();
    assert_eq!(config.transport.api_key, "sk-legacy");
}

#[test]
fn test_missing_key_is_a_config_error() {
    let err = AppConfig::from_lookup(lookup(&[("SUMMARY_API_KEY", "  ")])).unwrap_err();
    assert!(matches!(err, SummaryError::Config(_)));
}

#[test]
fn test_overrides_and_explicit_proxy() {
    let config = AppConfig::from_lookup(lookup(&[
        ("SUMMARY_API_KEY", "sk-test"),
        ("SUMMARY_API_URL", "https://llm.internal/v1/chat/completions"),
        ("SUMMARY_MODEL", "house-model"),
        ("SUMMARY_PROXY_HOST", "127.0.0.1"),
        ("SUMMARY_PROXY_PORT", "7890"),
        ("SUMMARY_MAX_RETRIES", "4"),
        ("SUMMARY_BACKOFF_MS", "250"),
        ("SUMMARY_DEFAULT_MAX_LENGTH", "50"),
        ("SUMMARY_READ_TIMEOUT_SECS", "5"),
    ]))
    .unwrap();

    assert_eq!(config.model, "house-model");
    assert_eq!(config.transport.proxy, Some(("127.0.0.1".to_string(), 7890)));
    assert_eq!(config.max_retries, 4);
    assert_eq!(config.backoff_base, Duration::from_millis(250));
    assert_eq!(config.default_max_length, 50);
    assert_eq!(config.transport.read_timeout, Duration::from_secs(5));

    let summarizer = Summarizer::from_config(&config).unwrap();
    assert_eq!(summarizer.default_max_length(), 50);
}

#[test]
fn test_bad_numbers_are_config_errors() {
    for (key, value) in [
        ("SUMMARY_MAX_RETRIES", "many"),
        ("SUMMARY_PROXY_PORT", "99999"),
        ("SUMMARY_DEFAULT_MAX_LENGTH", "0"),
    ] {
        let mut pairs = vec![("SUMMARY_API_KEY", "sk-test"), (key, value)];
        if key == "SUMMARY_PROXY_PORT" {
            pairs.push(("SUMMARY_PROXY_HOST", "proxy.local"));
        }
        let result = AppConfig::from_lookup(lookup(&pairs));
        assert!(matches!(result, Err(SummaryError::Config(_))), "{key}={value}");
    }
}

#[test]
fn test_invalid_primary_url_fails_construction() {
    let config = AppConfig::from_lookup(lookup(&[
        ("SUMMARY_API_KEY", "sk-test"),
        ("SUMMARY_API_URL", "api.deepseek.com"),
    ]))
    .unwrap();

    assert!(matches!(Summarizer::from_config(&config), Err(SummaryError::Config(_))));
}

#[test]
fn test_api_key_with_control_characters_fails_construction() {
    let config = AppConfig::from_lookup(lookup(&[("SUMMARY_API_KEY", "sk-bad\nkey")])).unwrap();

    assert!(matches!(Summarizer::from_config(&config), Err(SummaryError::Config(_))));
}

#[test]
fn test_default_max_length_reads_without_api_key() {
    assert_eq!(default_max_length(&lookup(&[])).unwrap(), 30);
    assert_eq!(
        default_max_length(&lookup(&[("SUMMARY_DEFAULT_MAX_LENGTH", "12")])).unwrap(),
        12
    );
    assert!(matches!(
        default_max_length(&lookup(&[("SUMMARY_DEFAULT_MAX_LENGTH", "0")])),
        Err(SummaryError::Config(_))
    ));
}
