//! Port definitions for suggestion ingestion.

pub mod inference;

pub use inference::{InferenceError, InferenceResult, InferenceService, PROBE_PROMPT};
