//! Port for the external text-completion service.
//!
//! The service takes a prompt and a model name and returns either the
//! completion text or a typed failure. Which failure occurred matters to
//! negotiation: an invalid credential halts it, every other failure moves on
//! to the next candidate model.

use crate::suggestion::domain::ModelName;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Trivial prompt sent to a candidate model to check that it answers.
pub const PROBE_PROMPT: &str = "Test";

/// Result type for inference calls.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// External text-completion service contract.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Sends `prompt` to `model` and returns the completion text.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] when the call fails or the reply carries
    /// no text.
    async fn complete(&self, model: &ModelName, prompt: &str) -> InferenceResult<String>;
}

/// Errors returned by inference service implementations.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    /// The credential is missing, malformed or rejected. Not retryable
    /// across candidate models.
    #[error("invalid inference credential: {0}")]
    InvalidCredential(String),

    /// The named model does not exist, is not enabled or is overloaded.
    #[error("model {model} unavailable: {reason}")]
    ModelUnavailable {
        /// Model that failed.
        model: ModelName,
        /// Failure detail reported by the service.
        reason: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("inference request timed out after {0:?}")]
    Timeout(Duration),

    /// Transport failure.
    #[error("inference network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with a payload that carries no completion text.
    #[error("malformed inference reply: {0}")]
    MalformedReply(String),
}

impl InferenceError {
    /// Wraps a transport error.
    #[must_use]
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Creates a model-unavailable error.
    #[must_use]
    pub fn model_unavailable(model: &ModelName, reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            model: model.clone(),
            reason: reason.into(),
        }
    }

    /// Returns whether negotiation must stop instead of trying the next
    /// candidate.
    #[must_use]
    pub const fn halts_negotiation(&self) -> bool {
        matches!(self, Self::InvalidCredential(_))
    }
}
