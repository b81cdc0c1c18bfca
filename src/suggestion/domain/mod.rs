//! Domain model for task suggestions.
//!
//! Every suggestion type is provisional: it carries only the fields that
//! survived validation and is never merged into a task automatically.

mod analysis;
mod error;
mod model;
mod recurrence;
mod related;
mod schedule;
mod subtasks;
mod summary;

pub use analysis::TaskAnalysis;
pub use error::SuggestionDomainError;
pub use model::ModelName;
pub use recurrence::RecurrenceDetection;
pub use related::RelatedTasks;
pub use schedule::ScheduleProposal;
pub use subtasks::{MAX_SUBTASKS, Subtasks};
pub use summary::DailySummary;
