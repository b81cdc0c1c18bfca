//! Daily summary suggestion.

use crate::task::domain::TaskId;
use chrono::NaiveDate;

/// Natural-language overview of one day's work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    /// Day the summary covers.
    pub day: NaiveDate,
    /// Summary paragraph.
    pub summary: String,
    /// Tasks the model suggests focusing on, drawn from the request.
    pub focus_task_ids: Vec<TaskId>,
    /// Short actionable tips.
    pub tips: Vec<String>,
}
