//! Unit tests for the suggestion context.

mod config_tests;
mod support;
