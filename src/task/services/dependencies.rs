//! Dependency graph operations of the task repository.
//!
//! Cycle rejection happens before any mutation: a candidate edge is checked
//! against the current graph and only written when it keeps the graph
//! acyclic, so the stored graph is a DAG at all times.

use super::repository::{TaskRepository, TaskRepositoryResult, WriteDecision};
use crate::task::{
    domain::{DependencyGraph, Task, TaskId},
    ports::BlobStore,
};
use mockable::Clock;
use std::collections::HashMap;
use tracing::info;

impl<S, C> TaskRepository<S, C>
where
    S: BlobStore,
    C: Clock + Send + Sync,
{
    /// Records that `task_id` depends on `depends_on`.
    ///
    /// Returns `Ok(false)` without writing when the task does not exist, the
    /// edge is a self-loop, or the edge would close a cycle. Adding an edge
    /// that already exists succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError`] when the collection cannot be
    /// read or written.
    pub fn add_dependency(
        &self,
        task_id: &TaskId,
        depends_on: &TaskId,
    ) -> TaskRepositoryResult<bool> {
        if task_id == depends_on {
            info!(task_id = %task_id, "rejected self dependency");
            return Ok(false);
        }
        self.mutate_tasks(|tasks, clock| {
            let graph = DependencyGraph::from_tasks(tasks.iter());
            if !graph.contains(task_id) {
                return WriteDecision::Skip(false);
            }
            if graph.would_create_cycle(task_id, depends_on) {
                info!(
                    task_id = %task_id,
                    depends_on = %depends_on,
                    "rejected dependency that would create a cycle"
                );
                return WriteDecision::Skip(false);
            }
            let Some(task) = tasks.iter_mut().find(|task| task.id() == task_id) else {
                return WriteDecision::Skip(false);
            };
            if task.depends_on(depends_on) {
                return WriteDecision::Skip(true);
            }
            task.push_dependency(depends_on.clone(), clock);
            WriteDecision::Write(true)
        })
    }

    /// Removes the edge "`task_id` depends on `depends_on`".
    ///
    /// Returns `Ok(false)` when the task or the edge does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError`] when the collection cannot be
    /// read or written.
    pub fn remove_dependency(
        &self,
        task_id: &TaskId,
        depends_on: &TaskId,
    ) -> TaskRepositoryResult<bool> {
        self.mutate_tasks(|tasks, clock| {
            let Some(task) = tasks.iter_mut().find(|task| task.id() == task_id) else {
                return WriteDecision::Skip(false);
            };
            if task.remove_dependency(depends_on, clock) {
                WriteDecision::Write(true)
            } else {
                WriteDecision::Skip(false)
            }
        })
    }

    /// Returns a graph index over the current collection.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::Store`] when the blob store
    /// cannot be read.
    pub fn dependency_graph(&self) -> TaskRepositoryResult<DependencyGraph> {
        Ok(DependencyGraph::from_tasks(self.list()?.iter()))
    }

    /// Returns every live task identifier reachable from `task_id` by
    /// following dependency edges, without duplicates.
    ///
    /// Dangling identifiers (deleted tasks) are filtered out.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::Store`] when the blob store
    /// cannot be read.
    pub fn transitive_closure(&self, task_id: &TaskId) -> TaskRepositoryResult<Vec<TaskId>> {
        let graph = self.dependency_graph()?;
        Ok(graph
            .transitive_closure(task_id)
            .into_iter()
            .filter(|id| graph.contains(id))
            .collect())
    }

    /// Returns the task records of the transitive closure of `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::Store`] when the blob store
    /// cannot be read.
    pub fn dependency_tasks(&self, task_id: &TaskId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.list()?;
        let graph = DependencyGraph::from_tasks(tasks.iter());
        let by_id: HashMap<&TaskId, &Task> = tasks.iter().map(|task| (task.id(), task)).collect();
        Ok(graph
            .transitive_closure(task_id)
            .iter()
            .filter_map(|id| by_id.get(id).map(|task| (*task).clone()))
            .collect())
    }

    /// Returns every task whose dependency list contains `task_id`, in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::Store`] when the blob store
    /// cannot be read.
    pub fn dependents(&self, task_id: &TaskId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.list()?;
        let graph = DependencyGraph::from_tasks(tasks.iter());
        let dependents = graph.dependents_of(task_id);
        Ok(tasks
            .iter()
            .filter(|task| dependents.contains(task.id()))
            .cloned()
            .collect())
    }
}
