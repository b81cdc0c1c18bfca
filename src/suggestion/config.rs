//! Inference configuration.
//!
//! Values come from [`InferenceConfig::default`], the builder methods or the
//! process environment:
//!
//! | Variable                 | Meaning                               |
//! |--------------------------|---------------------------------------|
//! | `TASKPILOT_API_KEY`      | Credential sent to the inference API  |
//! | `TASKPILOT_MODELS`       | Comma-separated candidate model names |
//! | `TASKPILOT_BASE_URL`     | Inference API endpoint                |
//! | `TASKPILOT_TIMEOUT_SECS` | Per-request timeout in seconds        |

use crate::suggestion::domain::ModelName;
use std::time::Duration;
use thiserror::Error;

/// Default inference endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Candidate models tried in order when none are configured.
pub const DEFAULT_CANDIDATE_MODELS: [&str; 3] = ["gemini-1.5-pro", "gemini-pro", "gemini-1.0-pro"];

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Confidence below which a recurrence detection counts as "no pattern".
pub const DEFAULT_RECURRENCE_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Credentials shorter than this are rejected without a network call.
pub const MIN_API_KEY_LEN: usize = 10;

const API_KEY_VAR: &str = "TASKPILOT_API_KEY";
const MODELS_VAR: &str = "TASKPILOT_MODELS";
const BASE_URL_VAR: &str = "TASKPILOT_BASE_URL";
const TIMEOUT_VAR: &str = "TASKPILOT_TIMEOUT_SECS";

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The candidate model list is empty.
    #[error("TASKPILOT_MODELS must name at least one model")]
    EmptyCandidateList,

    /// The timeout is not a positive whole number of seconds.
    #[error("TASKPILOT_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Settings for the inference client and suggestion service.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// API credential; `None` fails every request as an invalid credential.
    pub api_key: Option<String>,
    /// Inference API endpoint without a trailing slash.
    pub base_url: String,
    /// Models tried in order during negotiation.
    pub candidate_models: Vec<ModelName>,
    /// Per-request timeout applied by the HTTP client.
    pub request_timeout: Duration,
    /// Minimum confidence for a recurrence detection to be reported.
    pub recurrence_confidence_threshold: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            candidate_models: default_candidates(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            recurrence_confidence_threshold: DEFAULT_RECURRENCE_CONFIDENCE_THRESHOLD,
        }
    }
}

impl InferenceConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through a variable lookup function.
    ///
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self {
            api_key: read(API_KEY_VAR),
            ..Self::default()
        };
        if let Some(base_url) = read(BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }
        if let Some(models) = read(MODELS_VAR) {
            let candidates: Vec<ModelName> = models
                .split(',')
                .filter_map(|name| ModelName::new(name).ok())
                .collect();
            if candidates.is_empty() {
                return Err(ConfigError::EmptyCandidateList);
            }
            config.candidate_models = candidates;
        }
        if let Some(raw) = read(TIMEOUT_VAR) {
            let seconds = raw
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.request_timeout = Duration::from_secs(seconds);
        }
        Ok(config)
    }

    /// Sets the API credential.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the endpoint. A trailing slash is removed.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Replaces the candidate model list.
    #[must_use]
    pub fn with_candidate_models(mut self, models: impl IntoIterator<Item = ModelName>) -> Self {
        self.candidate_models = models.into_iter().collect();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the recurrence confidence threshold.
    #[must_use]
    pub const fn with_recurrence_confidence_threshold(mut self, threshold: f64) -> Self {
        self.recurrence_confidence_threshold = threshold;
        self
    }

    /// Returns the credential when it is long enough to be plausible.
    #[must_use]
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| key.chars().count() >= MIN_API_KEY_LEN)
    }
}

fn default_candidates() -> Vec<ModelName> {
    DEFAULT_CANDIDATE_MODELS
        .iter()
        .filter_map(|name| ModelName::new(*name).ok())
        .collect()
}
