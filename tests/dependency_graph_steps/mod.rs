//! Step definitions for dependency graph BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
