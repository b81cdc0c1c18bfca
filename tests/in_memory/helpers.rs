//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskpilot::{
    suggestion::{
        adapters::ScriptedInferenceService, config::InferenceConfig, domain::ModelName,
        services::SuggestionService,
    },
    task::{
        adapters::memory::InMemoryBlobStore,
        domain::{Task, TaskDraft},
        services::TaskRepository,
    },
};

/// Repository type used by the integration tests.
pub type TestRepository = TaskRepository<InMemoryBlobStore, DefaultClock>;

/// Repository together with a handle on its backing store.
pub struct Workspace {
    pub store: InMemoryBlobStore,
    pub repository: TestRepository,
}

/// Provides a fresh repository over an empty in-memory store.
#[fixture]
pub fn workspace() -> Workspace {
    let store = InMemoryBlobStore::new();
    let repository = TaskRepository::new(Arc::new(store.clone()), Arc::new(DefaultClock));
    Workspace { store, repository }
}

/// Creates a task with the given title.
///
/// # Errors
///
/// Returns an error if the draft is invalid or the repository write fails.
pub fn create_task(repository: &TestRepository, title: &str) -> eyre::Result<Task> {
    Ok(repository.create(TaskDraft::new(title)?)?)
}

/// Creates one task per title, in order.
///
/// # Errors
///
/// Returns an error if any task cannot be created.
pub fn create_tasks(repository: &TestRepository, titles: &[&str]) -> eyre::Result<Vec<Task>> {
    titles
        .iter()
        .map(|title| create_task(repository, title))
        .collect()
}

/// Returns the titles of `tasks`, in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::title).collect()
}

/// Builds a suggestion service over a scripted inference service with two
/// candidate models.
///
/// # Errors
///
/// Returns an error if a candidate model name is invalid.
pub fn suggestion_service(
    inference: &Arc<ScriptedInferenceService>,
) -> eyre::Result<SuggestionService<ScriptedInferenceService>> {
    let candidates = vec![ModelName::new("primary")?, ModelName::new("fallback")?];
    let config = InferenceConfig::default().with_candidate_models(candidates);
    Ok(SuggestionService::new(Arc::clone(inference), &config))
}
