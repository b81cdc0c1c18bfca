//! Reduction of free-form model replies to structured JSON.
//!
//! A reply is reduced to a JSON candidate in three steps:
//!
//! 1. the content of the first fenced code block, when the reply has one;
//! 2. otherwise the span from the first opener of the expected
//!    [`JsonShape`] to the last closer of the same kind;
//! 3. otherwise the whole reply.
//!
//! The candidate must then parse as JSON; there is no partial recovery.

pub mod fields;

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

const FENCE_PATTERN: &str = r"```[A-Za-z]*\s*([\s\S]*?)```";

/// Error returned when a reply cannot be reduced to JSON.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("reply is not valid JSON: {reason}")]
pub struct ExtractionError {
    /// Parser diagnostic.
    pub reason: String,
}

/// Top-level JSON value an operation expects in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    /// A `{ ... }` object.
    Object,
    /// A `[ ... ]` array.
    Array,
}

impl JsonShape {
    const fn delimiters(self) -> (char, char) {
        match self {
            Self::Object => ('{', '}'),
            Self::Array => ('[', ']'),
        }
    }
}

fn fence() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(FENCE_PATTERN).ok()).as_ref()
}

/// Returns the part of `reply` most likely to hold the JSON payload.
#[must_use]
pub fn extract_json_candidate(reply: &str, shape: JsonShape) -> &str {
    if let Some(inner) = fence()
        .and_then(|pattern| pattern.captures(reply))
        .and_then(|captures| captures.get(1))
    {
        return inner.as_str().trim();
    }
    bracketed_span(reply, shape).unwrap_or_else(|| reply.trim())
}

/// Returns the span from the first opener of `shape` to its last closer.
fn bracketed_span(reply: &str, shape: JsonShape) -> Option<&str> {
    let (opener, closer) = shape.delimiters();
    let start = reply.find(opener)?;
    let end = reply.rfind(closer)?;
    if end <= start {
        return None;
    }
    reply.get(start..=end)
}

/// Extracts and parses the JSON payload of a reply.
///
/// # Errors
///
/// Returns [`ExtractionError`] when the extracted candidate is not valid
/// JSON.
pub fn parse_reply(reply: &str, shape: JsonShape) -> Result<Value, ExtractionError> {
    serde_json::from_str(extract_json_candidate(reply, shape)).map_err(|err| ExtractionError {
        reason: err.to_string(),
    })
}
