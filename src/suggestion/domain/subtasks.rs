//! Subtask suggestion.

/// Upper bound on the number of suggested subtasks.
pub const MAX_SUBTASKS: usize = 5;

/// Suggested breakdown of a task into smaller steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subtasks(Vec<String>);

impl Subtasks {
    /// Keeps the first [`MAX_SUBTASKS`] non-blank entries, trimmed.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = String>) -> Self {
        Self(
            items
                .into_iter()
                .map(|item| item.trim().to_owned())
                .filter(|item| !item.is_empty())
                .take(MAX_SUBTASKS)
                .collect(),
        )
    }

    /// Returns the subtasks in suggested order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns whether no subtask was suggested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the suggestion, returning the subtasks.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
