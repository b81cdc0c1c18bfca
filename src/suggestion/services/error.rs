//! Service-level error type for suggestion operations.

use crate::suggestion::{domain::ModelName, ports::InferenceError};
use std::fmt;
use thiserror::Error;

/// Result type for suggestion operations.
pub type SuggestionResult<T> = Result<T, SuggestionError>;

/// A negotiation candidate that failed its probe.
#[derive(Debug, Clone)]
pub struct FailedCandidate {
    /// Candidate model.
    pub model: ModelName,
    /// Probe failure.
    pub error: InferenceError,
}

impl fmt::Display for FailedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.model, self.error)
    }
}

/// Errors returned by suggestion operations.
///
/// Every variant is retryable from the caller's point of view; none of them
/// leaves any trace in the task repository.
#[derive(Debug, Clone, Error)]
pub enum SuggestionError {
    /// Every candidate model failed its probe.
    #[error("no inference model available; tried {}", format_attempts(.attempts))]
    NoModelAvailable {
        /// Failed candidates in the order they were tried.
        attempts: Vec<FailedCandidate>,
    },

    /// The credential was rejected; negotiation stopped immediately.
    #[error("inference credential rejected: {0}")]
    InvalidCredential(String),

    /// The bound model failed to answer a request.
    #[error(transparent)]
    Inference(InferenceError),

    /// The model replied but the reply could not be reduced to valid data.
    #[error("unparsable {operation} response: {reason}")]
    UnparsableResponse {
        /// Suggestion operation that received the reply.
        operation: &'static str,
        /// Why the reply was rejected.
        reason: String,
    },

    /// The reply parsed but no field survived validation.
    #[error("{operation} response contained no usable suggestion")]
    EmptySuggestion {
        /// Suggestion operation that received the reply.
        operation: &'static str,
    },

    /// A prompt template failed to render.
    #[error("failed to render {operation} prompt: {reason}")]
    Prompt {
        /// Suggestion operation whose prompt failed.
        operation: &'static str,
        /// Renderer diagnostic.
        reason: String,
    },
}

impl SuggestionError {
    /// Creates an unparsable-response error.
    #[must_use]
    pub fn unparsable(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::UnparsableResponse {
            operation,
            reason: reason.into(),
        }
    }

    pub(super) fn prompt(operation: &'static str, err: &minijinja::Error) -> Self {
        Self::Prompt {
            operation,
            reason: err.to_string(),
        }
    }
}

impl From<InferenceError> for SuggestionError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::InvalidCredential(reason) => Self::InvalidCredential(reason),
            other => Self::Inference(other),
        }
    }
}

fn format_attempts(attempts: &[FailedCandidate]) -> String {
    if attempts.is_empty() {
        return "no candidates".to_owned();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}
