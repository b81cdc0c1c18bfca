//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The completion percentage is outside `0..=100`.
    #[error("invalid completion percentage {0}, expected 0-100")]
    InvalidCompletionPercentage(u8),

    /// The category display name is empty after trimming.
    #[error("category name must not be empty")]
    EmptyCategoryName,

    /// The recurrence interval is zero.
    #[error("recurrence interval must be at least 1")]
    InvalidRecurrenceInterval,

    /// The recurrence day of month is outside `1..=31`.
    #[error("invalid day of month {0}, expected 1-31")]
    InvalidDayOfMonth(u8),

    /// The recurrence month of year is outside `1..=12`.
    #[error("invalid month of year {0}, expected 1-12")]
    InvalidMonthOfYear(u8),
}

/// Error returned while parsing a priority level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a recurrence frequency.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown recurrence frequency: {0}")]
pub struct ParseFrequencyError(pub String);
