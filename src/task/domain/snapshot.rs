//! Suggestion snapshot stored on a task.

use super::{CategoryId, Priority, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Copy of a suggestion the user chose to keep alongside a task.
///
/// The snapshot is informational; it never overrides the task's own fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSnapshot {
    /// Suggested priority level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Suggested category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// Suggested estimate in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    /// Suggested deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_deadline: Option<DateTime<Utc>>,
    /// Tasks the suggestion recommended depending on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependency_recommendations: Vec<TaskId>,
    /// Free-text explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
