//! Shared world state for dependency graph BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskpilot::task::{
    adapters::memory::InMemoryBlobStore,
    domain::{Task, TaskId},
    services::TaskRepository,
};

/// Repository type used by the BDD world.
pub type TestRepository = TaskRepository<InMemoryBlobStore, DefaultClock>;

/// Scenario world for dependency graph behaviour tests.
pub struct DependencyWorld {
    pub repository: TestRepository,
    pub ids_by_title: HashMap<String, TaskId>,
    pub last_request_accepted: Option<bool>,
    pub last_closure: Option<Vec<TaskId>>,
}

impl DependencyWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: TaskRepository::new(
                Arc::new(InMemoryBlobStore::new()),
                Arc::new(DefaultClock),
            ),
            ids_by_title: HashMap::new(),
            last_request_accepted: None,
            last_closure: None,
        }
    }

    /// Resolves a scenario title to its task identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with the title was created.
    pub fn id_of(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.ids_by_title
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }

    /// Loads the stored record of a titled task.
    ///
    /// # Errors
    ///
    /// Returns an error when the task is unknown or the repository fails.
    pub fn task(&self, title: &str) -> Result<Task, eyre::Report> {
        let id = self.id_of(title)?;
        self.repository
            .get(&id)?
            .ok_or_else(|| eyre::eyre!("task {title:?} missing from repository"))
    }

    /// Maps identifiers back to scenario titles.
    #[must_use]
    pub fn titles_of(&self, ids: &[TaskId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| {
                self.ids_by_title
                    .iter()
                    .find(|(_, known)| *known == id)
                    .map(|(title, _)| title.clone())
            })
            .collect()
    }
}

impl Default for DependencyWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DependencyWorld {
    DependencyWorld::default()
}
