//! Domain model for task tracking.
//!
//! The task domain models task records, categories, the dependency graph
//! over task identifiers and the query predicates used by the repository,
//! while keeping storage concerns outside of the domain boundary.

mod category;
mod draft;
mod error;
mod filter;
mod graph;
mod ids;
mod recurrence;
mod snapshot;
mod stats;
mod task;

pub use category::{Category, DEFAULT_CATEGORY_COLOR, default_categories};
pub use draft::{TaskDraft, TaskPatch};
pub use error::{ParseFrequencyError, ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use filter::{DueDateRange, TaskFilter};
pub use graph::DependencyGraph;
pub use ids::{CategoryId, TaskId};
pub use recurrence::{RecurrenceFrequency, RecurringPattern};
pub use snapshot::SuggestionSnapshot;
pub use stats::{EstimateAccuracy, ProductivityStats};
pub use task::{CompletionPercentage, Priority, Task, TaskStatus};
