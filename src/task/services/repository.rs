//! Task repository: the canonical task collection on top of a blob store.
//!
//! Every mutating operation reads the full collection, applies the change
//! and writes the full collection back. Mutations are serialised behind a
//! process-local lock so overlapping callers cannot interleave their
//! read-modify-write cycles.

use crate::task::{
    domain::{ProductivityStats, Task, TaskDomainError, TaskDraft, TaskFilter, TaskId, TaskPatch},
    ports::{BlobKey, BlobStore, BlobStoreError},
};
use mockable::Clock;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors returned by repository operations.
///
/// Expected outcomes are not errors: unknown identifiers yield `None` or
/// `false`, rejected dependency edges yield `false`, and an empty or
/// unreadable store yields an empty collection.
#[derive(Debug, Error)]
pub enum TaskRepositoryError {
    /// The blob store failed.
    #[error(transparent)]
    Store(#[from] BlobStoreError),

    /// A collection could not be serialized.
    #[error("failed to encode collection {key}: {source}")]
    Encode {
        /// Blob key being written.
        key: BlobKey,
        /// Serializer error.
        source: serde_json::Error,
    },

    /// A category with the same derived identifier already exists.
    #[error("category already exists: {0}")]
    DuplicateCategory(crate::task::domain::CategoryId),

    /// The fallback category cannot be deleted.
    #[error("the default category {0} cannot be deleted")]
    DefaultCategoryProtected(crate::task::domain::CategoryId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A previous writer panicked while holding the write lock.
    #[error("repository write lock poisoned")]
    LockPoisoned,
}

/// Result type for repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Whether a mutation produced a change that must be written back.
pub(super) enum WriteDecision<T> {
    /// Persist the collection, then return the value.
    Write(T),
    /// Return the value without touching the store.
    Skip(T),
}

/// Task repository over a blob store.
pub struct TaskRepository<S, C>
where
    S: BlobStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    write_lock: Mutex<()>,
}

impl<S, C> TaskRepository<S, C>
where
    S: BlobStore,
    C: Clock + Send + Sync,
{
    /// Creates a repository over a blob store.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns every task in insertion order.
    ///
    /// An absent or unparsable task blob is a cold start and yields an empty
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the blob store cannot be
    /// read.
    pub fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self
            .load_collection::<Task>(&BlobKey::tasks())?
            .unwrap_or_default())
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the blob store cannot be
    /// read.
    pub fn get(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.list()?.into_iter().find(|task| task.id() == id))
    }

    /// Creates and persists a task, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the collection cannot be read or
    /// written.
    pub fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        self.mutate_tasks(|tasks, clock| {
            let task = Task::create(draft, clock);
            tasks.push(task.clone());
            debug!(task_id = %task.id(), "created task");
            WriteDecision::Write(task)
        })
    }

    /// Merges `patch` onto a task and refreshes its `updated_at`.
    ///
    /// Returns `Ok(None)` when no task has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the collection cannot be read or
    /// written.
    pub fn update(&self, id: &TaskId, patch: TaskPatch) -> TaskRepositoryResult<Option<Task>> {
        self.mutate_tasks(|tasks, clock| {
            let Some(task) = tasks.iter_mut().find(|task| task.id() == id) else {
                return WriteDecision::Skip(None);
            };
            task.apply(patch, clock);
            WriteDecision::Write(Some(task.clone()))
        })
    }

    /// Removes a task.
    ///
    /// Edges in other tasks that point at the removed task are kept; readers
    /// filter such dangling identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the collection cannot be read or
    /// written.
    pub fn delete(&self, id: &TaskId) -> TaskRepositoryResult<bool> {
        self.mutate_tasks(|tasks, _| {
            let before = tasks.len();
            tasks.retain(|task| task.id() != id);
            if tasks.len() == before {
                return WriteDecision::Skip(false);
            }
            debug!(task_id = %id, "deleted task");
            WriteDecision::Write(true)
        })
    }

    /// Returns the tasks matching every predicate of `filter`, in
    /// insertion order. The result is recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the blob store cannot be
    /// read.
    pub fn query(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect())
    }

    /// Counts one completed pomodoro session against a task.
    ///
    /// Returns `Ok(None)` when no task has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the collection cannot be read or
    /// written.
    pub fn log_pomodoro(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.mutate_tasks(|tasks, clock| {
            let Some(task) = tasks.iter_mut().find(|task| task.id() == id) else {
                return WriteDecision::Skip(None);
            };
            task.record_pomodoro(clock);
            WriteDecision::Write(Some(task.clone()))
        })
    }

    /// Computes completion statistics over the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the blob store cannot be
    /// read.
    pub fn productivity_stats(&self) -> TaskRepositoryResult<ProductivityStats> {
        Ok(ProductivityStats::from_tasks(&self.list()?))
    }

    /// Runs a read-modify-write cycle over the task collection.
    pub(super) fn mutate_tasks<T>(
        &self,
        change: impl FnOnce(&mut Vec<Task>, &C) -> WriteDecision<T>,
    ) -> TaskRepositoryResult<T> {
        let _guard = self.lock_writes()?;
        let mut tasks = self.list()?;
        match change(&mut tasks, &*self.clock) {
            WriteDecision::Write(value) => {
                self.persist(&BlobKey::tasks(), &tasks)?;
                Ok(value)
            }
            WriteDecision::Skip(value) => Ok(value),
        }
    }

    pub(super) fn lock_writes(&self) -> TaskRepositoryResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| TaskRepositoryError::LockPoisoned)
    }

    pub(super) fn clock(&self) -> &C {
        &self.clock
    }

    /// Reads a collection blob; `None` means absent or unparsable.
    pub(super) fn load_collection<T: DeserializeOwned>(
        &self,
        key: &BlobKey,
    ) -> TaskRepositoryResult<Option<Vec<T>>> {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(records) => Ok(Some(records)),
            Err(err) => {
                warn!(key = %key, error = %err, "stored collection is unreadable, starting empty");
                Ok(None)
            }
        }
    }

    pub(super) fn persist<T: Serialize>(
        &self,
        key: &BlobKey,
        records: &[T],
    ) -> TaskRepositoryResult<()> {
        let bytes = serde_json::to_vec(records).map_err(|source| TaskRepositoryError::Encode {
            key: key.clone(),
            source,
        })?;
        self.store.set(key, &bytes)?;
        debug!(key = %key, records = records.len(), "persisted collection");
        Ok(())
    }
}
