//! Dependency graph over task identifiers.
//!
//! Edges live in each task's dependency list; this type indexes a snapshot
//! of those lists for traversal:
//!
//! - forward edges: task -> tasks it depends on, in list order
//! - reverse edges: task -> tasks depending on it, in collection order
//!
//! Both traversals use an explicit stack, so pathological chains cannot
//! exhaust the call stack.

use super::{Task, TaskId};
use std::collections::{HashMap, HashSet};

/// Read-only index of dependency edges built from a task collection.
///
/// Edges pointing at identifiers with no task record (dangling edges) are
/// indexed like any other edge; [`DependencyGraph::contains`] tells live
/// nodes apart.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: HashSet<TaskId>,
    edges: HashMap<TaskId, Vec<TaskId>>,
    reverse_edges: HashMap<TaskId, Vec<TaskId>>,
}

impl DependencyGraph {
    /// Indexes the dependency lists of a task collection.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut graph = Self::default();
        for task in tasks {
            graph.nodes.insert(task.id().clone());
            for dependency in task.dependencies() {
                graph.insert_edge(task.id(), dependency);
            }
        }
        graph
    }

    fn insert_edge(&mut self, task: &TaskId, depends_on: &TaskId) {
        let forward = self.edges.entry(task.clone()).or_default();
        if forward.contains(depends_on) {
            return;
        }
        forward.push(depends_on.clone());
        self.reverse_edges
            .entry(depends_on.clone())
            .or_default()
            .push(task.clone());
    }

    /// Returns whether a task record with this identifier exists.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.nodes.contains(id)
    }

    /// Returns the direct dependencies of a task.
    #[must_use]
    pub fn dependencies_of(&self, id: &TaskId) -> &[TaskId] {
        self.edges.get(id).map_or(&[], Vec::as_slice)
    }

    /// Returns the tasks that directly depend on `id`.
    #[must_use]
    pub fn dependents_of(&self, id: &TaskId) -> &[TaskId] {
        self.reverse_edges.get(id).map_or(&[], Vec::as_slice)
    }

    /// Returns whether `target` is reachable from `start` by following
    /// dependency edges outward.
    ///
    /// `start` itself is not considered reached unless a path leads back to
    /// it.
    #[must_use]
    pub fn reaches(&self, start: &TaskId, target: &TaskId) -> bool {
        let mut visited: HashSet<&TaskId> = HashSet::new();
        let mut stack: Vec<&TaskId> = self.dependencies_of(start).iter().collect();

        while let Some(node) = stack.pop() {
            if node == target {
                return true;
            }
            if !visited.insert(node) {
                continue;
            }
            stack.extend(self.dependencies_of(node).iter());
        }
        false
    }

    /// Returns whether adding "`task` depends on `depends_on`" would close a
    /// cycle, including the self-loop case.
    #[must_use]
    pub fn would_create_cycle(&self, task: &TaskId, depends_on: &TaskId) -> bool {
        task == depends_on || self.reaches(depends_on, task)
    }

    /// Returns every identifier reachable from `id`, without duplicates.
    ///
    /// Identifiers are listed in depth-first discovery order, following each
    /// dependency list in order. `id` itself is excluded.
    #[must_use]
    pub fn transitive_closure(&self, id: &TaskId) -> Vec<TaskId> {
        let mut seen: HashSet<&TaskId> = HashSet::new();
        let mut ordered: Vec<TaskId> = Vec::new();
        let mut stack: Vec<&TaskId> = self.dependencies_of(id).iter().rev().collect();

        while let Some(node) = stack.pop() {
            if node == id || !seen.insert(node) {
                continue;
            }
            ordered.push(node.clone());
            stack.extend(self.dependencies_of(node).iter().rev());
        }
        ordered
    }
}
