//! Model negotiation with sticky, single-flight binding.
//!
//! Candidates are probed in list order and the first one that answers is
//! bound for the rest of the process lifetime. The binding slot is guarded
//! by an async mutex held for the whole negotiation, so concurrent first
//! callers wait for one negotiation instead of probing in parallel.

use super::{FailedCandidate, SuggestionError, SuggestionResult};
use crate::suggestion::{
    domain::ModelName,
    ports::{InferenceError, InferenceService, PROBE_PROMPT},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Selects and remembers the model that answers requests.
pub struct ModelNegotiator<I>
where
    I: InferenceService,
{
    inference: Arc<I>,
    candidates: Vec<ModelName>,
    bound: Mutex<Option<ModelName>>,
}

impl<I> ModelNegotiator<I>
where
    I: InferenceService,
{
    /// Creates a negotiator over an ordered candidate list.
    #[must_use]
    pub fn new(inference: Arc<I>, candidates: Vec<ModelName>) -> Self {
        Self {
            inference,
            candidates,
            bound: Mutex::new(None),
        }
    }

    /// Returns the candidate list in probe order.
    #[must_use]
    pub fn candidates(&self) -> &[ModelName] {
        &self.candidates
    }

    /// Returns the bound model without negotiating.
    pub async fn bound_model(&self) -> Option<ModelName> {
        self.bound.lock().await.clone()
    }

    /// Returns the bound model, negotiating first when none is bound.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::InvalidCredential`] as soon as a probe
    /// reports a rejected credential, or
    /// [`SuggestionError::NoModelAvailable`] when every candidate fails.
    pub async fn model(&self) -> SuggestionResult<ModelName> {
        let mut bound = self.bound.lock().await;
        if let Some(model) = bound.as_ref() {
            return Ok(model.clone());
        }
        let model = self.negotiate().await?;
        *bound = Some(model.clone());
        Ok(model)
    }

    /// Clears the binding if it still names `stale`.
    ///
    /// A caller holding an outdated model name cannot undo a binding made
    /// by another caller in the meantime.
    pub async fn invalidate(&self, stale: &ModelName) {
        let mut bound = self.bound.lock().await;
        if bound.as_ref() == Some(stale) {
            warn!(model = %stale, "dropping unavailable model binding");
            *bound = None;
        }
    }

    /// Sends `prompt` to the bound model.
    ///
    /// When the bound model reports itself unavailable, the binding is
    /// cleared, negotiation restarts from the first candidate and the
    /// request is retried once.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError`] when negotiation fails or the request
    /// fails on the (re)bound model.
    pub async fn complete(&self, prompt: &str) -> SuggestionResult<String> {
        let model = self.model().await?;
        match self.inference.complete(&model, prompt).await {
            Ok(reply) => Ok(reply),
            Err(InferenceError::ModelUnavailable { reason, .. }) => {
                warn!(model = %model, %reason, "bound model unavailable, renegotiating");
                self.invalidate(&model).await;
                let fallback = self.model().await?;
                Ok(self.inference.complete(&fallback, prompt).await?)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn negotiate(&self) -> SuggestionResult<ModelName> {
        let mut attempts: Vec<FailedCandidate> = Vec::new();
        for model in &self.candidates {
            match self.inference.complete(model, PROBE_PROMPT).await {
                Ok(_) => {
                    info!(model = %model, failed = attempts.len(), "bound inference model");
                    return Ok(model.clone());
                }
                Err(err) if err.halts_negotiation() => {
                    error!(model = %model, error = %err, "credential rejected, stopping negotiation");
                    return Err(err.into());
                }
                Err(err) => {
                    warn!(model = %model, error = %err, "candidate model failed probe");
                    attempts.push(FailedCandidate {
                        model: model.clone(),
                        error: err,
                    });
                }
            }
        }
        error!(candidates = self.candidates.len(), "every candidate model failed");
        Err(SuggestionError::NoModelAvailable { attempts })
    }
}
