//! Create and update inputs for task records.

use super::{
    CategoryId, CompletionPercentage, Priority, RecurringPattern, SuggestionSnapshot,
    TaskDomainError, TaskId, TaskStatus,
};
use chrono::{DateTime, Utc};

/// Input for creating a task.
///
/// Identifier and timestamps are assigned by [`super::Task::create`]; every
/// other field starts from its default and is set through the builder
/// methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) priority: Priority,
    pub(crate) status: TaskStatus,
    pub(crate) category: CategoryId,
    pub(crate) due_date: Option<DateTime<Utc>>,
    pub(crate) estimated_time: Option<u32>,
    pub(crate) actual_time: Option<u32>,
    pub(crate) completion_percentage: Option<CompletionPercentage>,
    pub(crate) ai_generated: bool,
    pub(crate) dependencies: Vec<TaskId>,
    pub(crate) recurring_pattern: Option<RecurringPattern>,
    pub(crate) ai_suggestions: Option<SuggestionSnapshot>,
}

impl TaskDraft {
    /// Creates a draft with the required title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        let title = normalize_title(title.into())?;
        Ok(Self {
            title,
            description: String::new(),
            priority: Priority::default(),
            status: TaskStatus::default(),
            category: CategoryId::default_category(),
            due_date: None,
            estimated_time: None,
            actual_time: None,
            completion_percentage: None,
            ai_generated: false,
            dependencies: Vec::new(),
            recurring_pattern: None,
            ai_suggestions: None,
        })
    }

    /// Returns the draft title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority level.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = category;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the estimated time in minutes.
    #[must_use]
    pub const fn with_estimated_time(mut self, minutes: u32) -> Self {
        self.estimated_time = Some(minutes);
        self
    }

    /// Sets the actual time spent in minutes.
    #[must_use]
    pub const fn with_actual_time(mut self, minutes: u32) -> Self {
        self.actual_time = Some(minutes);
        self
    }

    /// Sets the completion percentage.
    #[must_use]
    pub const fn with_completion_percentage(mut self, percentage: CompletionPercentage) -> Self {
        self.completion_percentage = Some(percentage);
        self
    }

    /// Marks the task as created from a suggestion.
    #[must_use]
    pub const fn ai_generated(mut self) -> Self {
        self.ai_generated = true;
        self
    }

    /// Sets the initial dependency list. Duplicates are dropped on creation.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskId>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    /// Sets the recurring pattern.
    #[must_use]
    pub fn with_recurring_pattern(mut self, pattern: RecurringPattern) -> Self {
        self.recurring_pattern = Some(pattern);
        self
    }

    /// Attaches a suggestion snapshot.
    #[must_use]
    pub fn with_ai_suggestions(mut self, snapshot: SuggestionSnapshot) -> Self {
        self.ai_suggestions = Some(snapshot);
        self
    }
}

/// Partial update for an existing task.
///
/// Absent fields are left untouched. Optional task fields use a nested
/// `Option` so a patch can distinguish "leave as is" from "clear".
/// Dependencies are not part of a patch; edges only change through the
/// dependency operations, which enforce acyclicity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) priority: Option<Priority>,
    pub(crate) status: Option<TaskStatus>,
    pub(crate) category: Option<CategoryId>,
    pub(crate) due_date: Option<Option<DateTime<Utc>>>,
    pub(crate) estimated_time: Option<Option<u32>>,
    pub(crate) actual_time: Option<Option<u32>>,
    pub(crate) completion_percentage: Option<Option<CompletionPercentage>>,
    pub(crate) ai_generated: Option<bool>,
    pub(crate) recurring_pattern: Option<Option<RecurringPattern>>,
    pub(crate) ai_suggestions: Option<Option<SuggestionSnapshot>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the patch sets no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the category the patch assigns, if any.
    #[must_use]
    pub const fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, TaskDomainError> {
        self.title = Some(normalize_title(title.into())?);
        Ok(self)
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority level.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Moves the task into a category.
    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Sets the estimated time in minutes.
    #[must_use]
    pub const fn with_estimated_time(mut self, minutes: u32) -> Self {
        self.estimated_time = Some(Some(minutes));
        self
    }

    /// Clears the estimated time.
    #[must_use]
    pub const fn clear_estimated_time(mut self) -> Self {
        self.estimated_time = Some(None);
        self
    }

    /// Sets the actual time spent in minutes.
    #[must_use]
    pub const fn with_actual_time(mut self, minutes: u32) -> Self {
        self.actual_time = Some(Some(minutes));
        self
    }

    /// Sets the completion percentage.
    #[must_use]
    pub const fn with_completion_percentage(mut self, percentage: CompletionPercentage) -> Self {
        self.completion_percentage = Some(Some(percentage));
        self
    }

    /// Sets or clears the suggestion-origin flag.
    #[must_use]
    pub const fn with_ai_generated(mut self, ai_generated: bool) -> Self {
        self.ai_generated = Some(ai_generated);
        self
    }

    /// Sets the recurring pattern.
    #[must_use]
    pub fn with_recurring_pattern(mut self, pattern: RecurringPattern) -> Self {
        self.recurring_pattern = Some(Some(pattern));
        self
    }

    /// Clears the recurring pattern.
    #[must_use]
    pub fn clear_recurring_pattern(mut self) -> Self {
        self.recurring_pattern = Some(None);
        self
    }

    /// Stores a suggestion snapshot on the task.
    #[must_use]
    pub fn with_ai_suggestions(mut self, snapshot: SuggestionSnapshot) -> Self {
        self.ai_suggestions = Some(Some(snapshot));
        self
    }
}

fn normalize_title(title: String) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
