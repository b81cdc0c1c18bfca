//! Application services for task tracking.

mod categories;
mod dependencies;
mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
