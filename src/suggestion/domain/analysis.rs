//! Task analysis suggestion.

use crate::task::domain::{CategoryId, Priority, SuggestionSnapshot, TaskPatch};
use chrono::{DateTime, Utc};

/// Suggested field values for a single task.
///
/// Each field is present only when the model supplied a value that passed
/// validation. An analysis with no fields is never returned by the
/// suggestion service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskAnalysis {
    /// Suggested priority level.
    pub priority: Option<Priority>,
    /// Suggested category display name, which may not exist yet.
    pub category: Option<String>,
    /// Suggested estimate in minutes.
    pub estimated_time: Option<u32>,
    /// Suggested deadline.
    pub suggested_deadline: Option<DateTime<Utc>>,
    /// Free-text explanation.
    pub reason: Option<String>,
}

impl TaskAnalysis {
    /// Returns whether no actionable field is present.
    ///
    /// A reason on its own is not actionable.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.category.is_none()
            && self.estimated_time.is_none()
            && self.suggested_deadline.is_none()
    }

    /// Returns the identifier the suggested category would receive.
    #[must_use]
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_deref().map(CategoryId::from_name)
    }

    /// Builds the update that would apply this analysis to a task.
    ///
    /// The patch also stores the analysis as the task's suggestion snapshot.
    /// Callers that accept a suggested category should make sure it exists
    /// first, for example with `TaskRepository::ensure_category`.
    #[must_use]
    pub fn to_patch(&self) -> TaskPatch {
        let mut patch = TaskPatch::new().with_ai_suggestions(self.to_snapshot());
        if let Some(priority) = self.priority {
            patch = patch.with_priority(priority);
        }
        if let Some(category) = self.category_id() {
            patch = patch.with_category(category);
        }
        if let Some(minutes) = self.estimated_time {
            patch = patch.with_estimated_time(minutes);
        }
        if let Some(deadline) = self.suggested_deadline {
            patch = patch.with_due_date(deadline);
        }
        patch
    }

    /// Converts the analysis into the snapshot stored on a task.
    #[must_use]
    pub fn to_snapshot(&self) -> SuggestionSnapshot {
        SuggestionSnapshot {
            priority: self.priority,
            category: self.category_id(),
            estimated_time: self.estimated_time,
            suggested_deadline: self.suggested_deadline,
            dependency_recommendations: Vec::new(),
            reason: self.reason.clone(),
        }
    }
}
