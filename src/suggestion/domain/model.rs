//! Inference model identifiers.

use super::SuggestionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a candidate inference model, for example `gemini-1.5-pro`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelName(String);

impl ModelName {
    /// Creates a validated model name.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionDomainError::EmptyModelName`] when the name is
    /// blank.
    pub fn new(name: impl Into<String>) -> Result<Self, SuggestionDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SuggestionDomainError::EmptyModelName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the model name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModelName {
    type Error = SuggestionDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelName> for String {
    fn from(value: ModelName) -> Self {
        value.0
    }
}

impl AsRef<str> for ModelName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
