//! Adapter implementations of the inference port.

pub mod gemini;
pub mod memory;

pub use gemini::GeminiInferenceService;
pub use memory::{RecordedCall, ScriptedInferenceService};
