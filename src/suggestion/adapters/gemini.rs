//! HTTP adapter for the Gemini `generateContent` API.

use crate::suggestion::{
    config::InferenceConfig,
    domain::ModelName,
    ports::{InferenceError, InferenceResult, InferenceService},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";
const BLOCK_MEDIUM_AND_ABOVE: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Harm categories filtered on every request.
pub const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Inference service backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiInferenceService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeminiInferenceService {
    /// Builds an HTTP client from the configuration.
    ///
    /// A missing or implausibly short credential is accepted here and
    /// reported as [`InferenceError::InvalidCredential`] on the first call,
    /// so negotiation can stop before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &InferenceConfig) -> InferenceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(InferenceError::network)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.usable_api_key().map(str::to_owned),
            timeout: config.request_timeout,
        })
    }

    fn endpoint(&self, model: &ModelName) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl InferenceService for GeminiInferenceService {
    async fn complete(&self, model: &ModelName, prompt: &str) -> InferenceResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(InferenceError::InvalidCredential(
                "missing or too short API key".to_owned(),
            ));
        };

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateRequest::new(prompt))
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(model, status, &body));
        }

        let reply = response
            .json::<GenerateResponse>()
            .await
            .map_err(|err| InferenceError::MalformedReply(err.to_string()))?;
        let text = reply.text();
        debug!(model = %model, chars = text.len(), "received completion");
        if text.trim().is_empty() {
            return Err(InferenceError::MalformedReply(
                reply
                    .block_reason()
                    .map_or_else(|| "reply carried no text".to_owned(), |reason| {
                        format!("prompt blocked: {reason}")
                    }),
            ));
        }
        Ok(text)
    }
}

impl GeminiInferenceService {
    fn transport_error(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(self.timeout)
        } else {
            InferenceError::network(err)
        }
    }
}

/// Maps a non-success HTTP status onto the inference error taxonomy.
fn classify_failure(model: &ModelName, status: StatusCode, body: &str) -> InferenceError {
    let rejected_key = status == StatusCode::BAD_REQUEST && body.contains("API key");
    if rejected_key || matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return InferenceError::InvalidCredential(format!("HTTP {status}"));
    }
    InferenceError::model_unavailable(model, format!("HTTP {status}: {}", body.trim()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    safety_settings: Vec<SafetySetting>,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: BLOCK_MEDIUM_AND_ABOVE,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ReplyContent>,
}

#[derive(Debug, Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
