//! Dependency graph integrity across repository operations.

use super::helpers::{Workspace, create_tasks, titles, workspace};
use eyre::{Result, eyre};
use rstest::rstest;
use taskpilot::task::domain::{Task, TaskId, TaskPatch, TaskStatus};

fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(|task| task.id().clone()).collect()
}

#[rstest]
fn every_cycle_closing_edge_is_rejected(workspace: Workspace) -> Result<()> {
    let tasks = create_tasks(&workspace.repository, &["A", "B", "C", "D"])?;
    let [a, b, c, d]: [TaskId; 4] = ids(&tasks)
        .try_into()
        .map_err(|_| eyre!("expected four tasks"))?;
    let repository = &workspace.repository;
    assert!(repository.add_dependency(&a, &b)?);
    assert!(repository.add_dependency(&b, &c)?);
    assert!(repository.add_dependency(&c, &d)?);

    for (from, to) in [(&d, &a), (&d, &b), (&c, &a), (&b, &a), (&d, &d)] {
        assert!(
            !repository.add_dependency(from, to)?,
            "edge {from} -> {to} must be rejected"
        );
    }

    let graph = repository.dependency_graph()?;
    assert!(!graph.reaches(&a, &a));
    assert_eq!(repository.transitive_closure(&a)?, [b, c, d.clone()]);
    assert!(repository.transitive_closure(&d)?.is_empty());
    Ok(())
}

#[rstest]
fn updates_do_not_touch_dependency_lists(workspace: Workspace) -> Result<()> {
    let tasks = create_tasks(&workspace.repository, &["Deploy", "Build"])?;
    let [deploy, build]: [TaskId; 2] = ids(&tasks)
        .try_into()
        .map_err(|_| eyre!("expected two tasks"))?;
    workspace.repository.add_dependency(&deploy, &build)?;

    let updated = workspace
        .repository
        .update(&deploy, TaskPatch::new().with_status(TaskStatus::InProgress))?
        .ok_or_else(|| eyre!("task should exist"))?;

    assert_eq!(updated.dependencies(), [build]);
    Ok(())
}

#[rstest]
fn dependents_and_dependency_tasks_read_both_directions(workspace: Workspace) -> Result<()> {
    let tasks = create_tasks(&workspace.repository, &["Launch", "Docs", "Tests", "Code"])?;
    let [launch, docs, tests, code]: [TaskId; 4] = ids(&tasks)
        .try_into()
        .map_err(|_| eyre!("expected four tasks"))?;
    let repository = &workspace.repository;
    repository.add_dependency(&launch, &docs)?;
    repository.add_dependency(&launch, &tests)?;
    repository.add_dependency(&docs, &code)?;
    repository.add_dependency(&tests, &code)?;

    let upstream = repository.dependency_tasks(&launch)?;
    let downstream = repository.dependents(&code)?;

    assert_eq!(titles(&upstream), ["Docs", "Code", "Tests"]);
    assert_eq!(titles(&downstream), ["Docs", "Tests"]);
    Ok(())
}

#[rstest]
fn deleted_dependency_is_skipped_by_readers(workspace: Workspace) -> Result<()> {
    let tasks = create_tasks(&workspace.repository, &["Report", "Data", "Survey"])?;
    let [report, data, survey]: [TaskId; 3] = ids(&tasks)
        .try_into()
        .map_err(|_| eyre!("expected three tasks"))?;
    workspace.repository.add_dependency(&report, &data)?;
    workspace.repository.add_dependency(&data, &survey)?;

    assert!(workspace.repository.delete(&data)?);

    let stored = workspace
        .repository
        .get(&report)?
        .ok_or_else(|| eyre!("task should exist"))?;
    assert_eq!(stored.dependencies(), [data]);
    assert!(workspace.repository.transitive_closure(&report)?.is_empty());
    assert!(workspace.repository.dependency_tasks(&report)?.is_empty());
    Ok(())
}
