//! Related task recommendation.

use crate::task::domain::TaskId;

/// Tasks the model considers related to a subject task.
///
/// The list may be empty; it never contains the subject task or
/// identifiers outside the candidate set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedTasks {
    /// Related task identifiers, most relevant first.
    pub task_ids: Vec<TaskId>,
    /// Free-text explanation.
    pub reasoning: Option<String>,
}
