//! Error types for suggestion domain values.

use thiserror::Error;

/// Errors returned while constructing suggestion domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SuggestionDomainError {
    /// The model name is empty after trimming.
    #[error("model name must not be empty")]
    EmptyModelName,
}
