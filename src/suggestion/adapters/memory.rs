//! Scripted in-memory inference service.

use crate::suggestion::{
    domain::ModelName,
    ports::{InferenceError, InferenceResult, InferenceService, PROBE_PROMPT},
};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// A call received by [`ScriptedInferenceService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Model the call was addressed to.
    pub model: ModelName,
    /// Prompt text.
    pub prompt: String,
}

#[derive(Debug, Default)]
struct Script {
    unavailable: HashSet<ModelName>,
    credential_rejected: bool,
    replies: VecDeque<InferenceResult<String>>,
    calls: Vec<RecordedCall>,
}

/// Deterministic inference service for tests and offline use.
///
/// Probe prompts succeed for every model that has not been marked
/// unavailable and do not consume scripted replies. Every other prompt
/// consumes the next scripted reply in order; an exhausted script yields a
/// malformed-reply failure.
#[derive(Debug, Default)]
pub struct ScriptedInferenceService {
    script: Mutex<Script>,
}

impl ScriptedInferenceService {
    /// Creates a service with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call to `model` fail as unavailable.
    #[must_use]
    pub fn with_unavailable_model(self, model: &ModelName) -> Self {
        self.mark_unavailable(model);
        self
    }

    /// Makes every call fail with a rejected credential.
    #[must_use]
    pub fn with_rejected_credential(self) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.credential_rejected = true;
        }
        self
    }

    /// Queues a successful completion.
    #[must_use]
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push_reply(text);
        self
    }

    /// Queues a successful completion on a shared service.
    pub fn push_reply(&self, text: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.replies.push_back(Ok(text.into()));
        }
    }

    /// Queues a failure on a shared service.
    pub fn push_failure(&self, error: InferenceError) {
        if let Ok(mut script) = self.script.lock() {
            script.replies.push_back(Err(error));
        }
    }

    /// Makes every later call to `model` fail as unavailable.
    pub fn mark_unavailable(&self, model: &ModelName) {
        if let Ok(mut script) = self.script.lock() {
            script.unavailable.insert(model.clone());
        }
    }

    /// Returns every call received so far, probes included.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script
            .lock()
            .map(|script| script.calls.clone())
            .unwrap_or_default()
    }

    /// Returns the models that received a probe, in order.
    #[must_use]
    pub fn probed_models(&self) -> Vec<ModelName> {
        self.calls()
            .into_iter()
            .filter(|call| call.prompt == PROBE_PROMPT)
            .map(|call| call.model)
            .collect()
    }

    fn lock(&self) -> InferenceResult<MutexGuard<'_, Script>> {
        self.script
            .lock()
            .map_err(|err| InferenceError::MalformedReply(format!("script lock poisoned: {err}")))
    }
}

#[async_trait]
impl InferenceService for ScriptedInferenceService {
    async fn complete(&self, model: &ModelName, prompt: &str) -> InferenceResult<String> {
        let mut script = self.lock()?;
        script.calls.push(RecordedCall {
            model: model.clone(),
            prompt: prompt.to_owned(),
        });
        if script.credential_rejected {
            return Err(InferenceError::InvalidCredential(
                "scripted credential rejection".to_owned(),
            ));
        }
        if script.unavailable.contains(model) {
            return Err(InferenceError::model_unavailable(model, "scripted outage"));
        }
        if prompt == PROBE_PROMPT {
            return Ok("OK".to_owned());
        }
        script.replies.pop_front().unwrap_or_else(|| {
            Err(InferenceError::MalformedReply(
                "no scripted reply left".to_owned(),
            ))
        })
    }
}
