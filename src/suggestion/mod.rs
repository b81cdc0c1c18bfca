//! Suggestion ingestion for task tracking.
//!
//! This module turns free-form replies from an external text-completion
//! service into typed, provisional task suggestions. It negotiates which of
//! several candidate models answers, extracts JSON from unstructured reply
//! text and discards any field that fails its type or range check. Nothing
//! here writes to the task repository; applying a suggestion is always an
//! explicit repository update made by the caller. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod parsing;
pub mod ports;
mod prompts;
pub mod services;

#[cfg(test)]
mod tests;
