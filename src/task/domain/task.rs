//! Task aggregate root and its scalar value types.

use super::{
    CategoryId, ParsePriorityError, ParseTaskStatusError, RecurringPattern, SuggestionSnapshot,
    TaskDomainError, TaskDraft, TaskId, TaskPatch,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task priority level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default level.
    #[default]
    Medium,
    /// Should be done soon.
    High,
    /// Needs attention now.
    Urgent,
}

impl Priority {
    /// Every priority level, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Task progress status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished.
    Completed,
    /// Deferred to a later date.
    Postponed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Postponed => "postponed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "postponed" => Ok(Self::Postponed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Completion percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CompletionPercentage(u8);

impl CompletionPercentage {
    /// Creates a validated completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCompletionPercentage`] when the value
    /// exceeds 100.
    pub const fn new(value: u8) -> Result<Self, TaskDomainError> {
        if value > 100 {
            return Err(TaskDomainError::InvalidCompletionPercentage(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CompletionPercentage {
    type Error = TaskDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompletionPercentage> for u8 {
    fn from(value: CompletionPercentage) -> Self {
        value.0
    }
}

/// Task aggregate root.
///
/// The serialized form is a flat record with camel-cased keys; date fields
/// are written as RFC 3339 strings and rehydrated on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    category: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actual_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completion_percentage: Option<CompletionPercentage>,
    #[serde(default)]
    ai_generated: bool,
    #[serde(default)]
    pomodoros_completed: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recurring_pattern: Option<RecurringPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ai_suggestions: Option<SuggestionSnapshot>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a fresh identifier.
    ///
    /// Both timestamps are taken from a single clock reading, so a new task
    /// always has `created_at == updated_at`.
    #[must_use]
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let TaskDraft {
            title,
            description,
            priority,
            status,
            category,
            due_date,
            estimated_time,
            actual_time,
            completion_percentage,
            ai_generated,
            dependencies,
            recurring_pattern,
            ai_suggestions,
        } = draft;

        let mut unique_dependencies: Vec<TaskId> = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            if !unique_dependencies.contains(&dependency) {
                unique_dependencies.push(dependency);
            }
        }

        Self {
            id: TaskId::new(),
            title,
            description,
            priority,
            status,
            category,
            due_date,
            estimated_time,
            actual_time,
            completion_percentage,
            ai_generated,
            pomodoros_completed: 0,
            dependencies: unique_dependencies,
            recurring_pattern,
            ai_suggestions,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority level.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the progress status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn category(&self) -> &CategoryId {
        &self.category
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the estimated time in minutes, if any.
    #[must_use]
    pub const fn estimated_time(&self) -> Option<u32> {
        self.estimated_time
    }

    /// Returns the actual time spent in minutes, if recorded.
    #[must_use]
    pub const fn actual_time(&self) -> Option<u32> {
        self.actual_time
    }

    /// Returns the completion percentage, if recorded.
    #[must_use]
    pub const fn completion_percentage(&self) -> Option<CompletionPercentage> {
        self.completion_percentage
    }

    /// Returns whether the task was created from a suggestion.
    #[must_use]
    pub const fn ai_generated(&self) -> bool {
        self.ai_generated
    }

    /// Returns the number of completed pomodoro sessions.
    #[must_use]
    pub const fn pomodoros_completed(&self) -> u32 {
        self.pomodoros_completed
    }

    /// Returns the identifiers this task depends on, in insertion order.
    ///
    /// Entries may name tasks that have since been deleted.
    #[must_use]
    pub fn dependencies(&self) -> &[TaskId] {
        &self.dependencies
    }

    /// Returns the recurring pattern, if any.
    #[must_use]
    pub const fn recurring_pattern(&self) -> Option<&RecurringPattern> {
        self.recurring_pattern.as_ref()
    }

    /// Returns the stored suggestion snapshot, if any.
    #[must_use]
    pub const fn ai_suggestions(&self) -> Option<&SuggestionSnapshot> {
        self.ai_suggestions.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether `id` is a direct dependency of this task.
    #[must_use]
    pub fn depends_on(&self, id: &TaskId) -> bool {
        self.dependencies.contains(id)
    }

    /// Merges the fields present in `patch` onto this task.
    ///
    /// Identifier and creation timestamp never change; `updated_at` is
    /// refreshed even when the patch is empty.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) {
        let TaskPatch {
            title,
            description,
            priority,
            status,
            category,
            due_date,
            estimated_time,
            actual_time,
            completion_percentage,
            ai_generated,
            recurring_pattern,
            ai_suggestions,
        } = patch;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = category {
            self.category = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = estimated_time {
            self.estimated_time = value;
        }
        if let Some(value) = actual_time {
            self.actual_time = value;
        }
        if let Some(value) = completion_percentage {
            self.completion_percentage = value;
        }
        if let Some(value) = ai_generated {
            self.ai_generated = value;
        }
        if let Some(value) = recurring_pattern {
            self.recurring_pattern = value;
        }
        if let Some(value) = ai_suggestions {
            self.ai_suggestions = value;
        }
        self.touch(clock);
    }

    /// Appends a dependency edge. Callers must have checked acyclicity.
    pub(crate) fn push_dependency(&mut self, id: TaskId, clock: &impl Clock) {
        self.dependencies.push(id);
        self.touch(clock);
    }

    /// Removes a dependency edge, returning whether it existed.
    pub(crate) fn remove_dependency(&mut self, id: &TaskId, clock: &impl Clock) -> bool {
        let before = self.dependencies.len();
        self.dependencies.retain(|existing| existing != id);
        if self.dependencies.len() == before {
            return false;
        }
        self.touch(clock);
        true
    }

    /// Moves the task into another category.
    pub(crate) fn reassign_category(&mut self, category: CategoryId, clock: &impl Clock) {
        self.category = category;
        self.touch(clock);
    }

    /// Counts one more completed pomodoro session.
    pub(crate) fn record_pomodoro(&mut self, clock: &impl Clock) {
        self.pomodoros_completed = self.pomodoros_completed.saturating_add(1);
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
