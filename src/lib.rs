//! Taskpilot: task tracking with dependency integrity and model-assisted
//! suggestions.
//!
//! This crate keeps a persistent collection of tasks and categories, guards
//! the "depends on" graph between tasks against cycles, and turns replies
//! from an external text-completion service into typed, provisional task
//! suggestions.
//!
//! # Architecture
//!
//! Taskpilot follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (files, HTTP, memory)
//!
//! # Modules
//!
//! - [`task`]: Task repository, categories and the dependency graph
//! - [`suggestion`]: Model negotiation and suggestion extraction
//! - [`telemetry`]: Tracing subscriber setup

pub mod suggestion;
pub mod task;
pub mod telemetry;
