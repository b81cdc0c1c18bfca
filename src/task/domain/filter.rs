//! Composable task query predicates.

use super::{CategoryId, Priority, Task, TaskStatus};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Inclusive due-date window measured in whole UTC calendar days.
///
/// A task matches when it has a due date whose UTC date falls within the
/// bounds; an open bound imposes no constraint on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueDateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DueDateRange {
    /// Matches tasks due on a single day.
    #[must_use]
    pub const fn on(day: NaiveDate) -> Self {
        Self {
            from: Some(day),
            to: Some(day),
        }
    }

    /// Matches tasks due between two days, both inclusive.
    #[must_use]
    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Matches tasks due on or after a day.
    #[must_use]
    pub const fn starting(from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Matches tasks due on or before a day.
    #[must_use]
    pub const fn until(to: NaiveDate) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    fn contains(&self, task: &Task) -> bool {
        let Some(due) = task.due_date() else {
            return false;
        };
        let day = due.date_naive();
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Query filter over the task collection.
///
/// All predicates are combined with logical AND; absent predicates impose
/// no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    statuses: Option<HashSet<TaskStatus>>,
    priorities: Option<HashSet<Priority>>,
    categories: Option<HashSet<CategoryId>>,
    search: Option<String>,
    due: Option<DueDateRange>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to the given statuses.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Restricts results to the given priority levels.
    #[must_use]
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities = Some(priorities.into_iter().collect());
        self
    }

    /// Restricts results to the given categories.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = CategoryId>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    /// Requires a case-insensitive substring match in title or description.
    ///
    /// A blank search string imposes no constraint.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let needle = search.into().to_lowercase();
        self.search = if needle.is_empty() { None } else { Some(needle) };
        self
    }

    /// Restricts results to a due-date window.
    #[must_use]
    pub const fn with_due(mut self, range: DueDateRange) -> Self {
        self.due = Some(range);
        self
    }

    /// Returns whether a task satisfies every predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self
            .statuses
            .as_ref()
            .is_none_or(|set| set.contains(&task.status()));
        let priority_ok = self
            .priorities
            .as_ref()
            .is_none_or(|set| set.contains(&task.priority()));
        let category_ok = self
            .categories
            .as_ref()
            .is_none_or(|set| set.contains(task.category()));
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            task.title().to_lowercase().contains(needle)
                || task.description().to_lowercase().contains(needle)
        });
        let due_ok = self.due.is_none_or(|range| range.contains(task));

        status_ok && priority_ok && category_ok && search_ok && due_ok
    }
}
