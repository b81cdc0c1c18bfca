//! Configuration loading tests.

use super::support::models;
use crate::suggestion::config::{
    ConfigError, DEFAULT_BASE_URL, DEFAULT_RECURRENCE_CONFIDENCE_THRESHOLD,
    DEFAULT_REQUEST_TIMEOUT, InferenceConfig,
};
use rstest::rstest;
use std::collections::HashMap;
use std::time::Duration;

fn load(vars: &[(&str, &str)]) -> Result<InferenceConfig, ConfigError> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    InferenceConfig::from_lookup(|name| map.get(name).cloned())
}

#[rstest]
fn defaults_apply_when_nothing_is_set() {
    let config = load(&[]).expect("defaults load");

    assert_eq!(config.api_key, None);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(
        config.candidate_models,
        models(&["gemini-1.5-pro", "gemini-pro", "gemini-1.0-pro"])
    );
    assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    assert_eq!(
        config.recurrence_confidence_threshold.to_bits(),
        DEFAULT_RECURRENCE_CONFIDENCE_THRESHOLD.to_bits()
    );
}

#[rstest]
fn variables_override_defaults() {
    let config = load(&[
        ("TASKPILOT_API_KEY", "  abcdefghijklmnop "),
        ("TASKPILOT_MODELS", "m1, m2 ,,m3"),
        ("TASKPILOT_BASE_URL", "http://localhost:8080/"),
        ("TASKPILOT_TIMEOUT_SECS", "5"),
    ])
    .expect("config loads");

    assert_eq!(config.api_key.as_deref(), Some("abcdefghijklmnop"));
    assert_eq!(config.candidate_models, models(&["m1", "m2", "m3"]));
    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[rstest]
#[case("0")]
#[case("-3")]
#[case("soon")]
fn invalid_timeout_is_rejected(#[case] raw: &str) {
    assert_eq!(
        load(&[("TASKPILOT_TIMEOUT_SECS", raw)]),
        Err(ConfigError::InvalidTimeout(raw.to_owned()))
    );
}

#[rstest]
fn model_list_of_separators_is_rejected() {
    assert_eq!(
        load(&[("TASKPILOT_MODELS", " , ,")]),
        Err(ConfigError::EmptyCandidateList)
    );
}

#[rstest]
#[case(None, None)]
#[case(Some("short"), None)]
#[case(Some("0123456789"), Some("0123456789"))]
fn usable_api_key_requires_minimum_length(
    #[case] key: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let config = InferenceConfig {
        api_key: key.map(str::to_owned),
        ..InferenceConfig::default()
    };

    assert_eq!(config.usable_api_key(), expected);
}
