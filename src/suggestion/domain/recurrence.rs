//! Recurring pattern detection.

use crate::task::domain::RecurringPattern;

/// A recurring pattern the model is confident about.
///
/// Detections below the configured confidence threshold are reported as
/// "no pattern" instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceDetection {
    /// Detected repetition rule.
    pub pattern: RecurringPattern,
    /// Model confidence in `0.0..=1.0`.
    pub confidence: f64,
}
