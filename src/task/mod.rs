//! Task tracking with an integrity-checked dependency graph.
//!
//! This module owns the canonical task collection: creating, updating and
//! deleting task records, organising them into categories, and recording
//! "depends on" edges between tasks while keeping the graph acyclic. Both
//! collections are persisted as whole JSON documents in a key/value blob
//! store. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
