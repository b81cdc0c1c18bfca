//! Unit tests for the task context.

mod repository_tests;
mod support;
