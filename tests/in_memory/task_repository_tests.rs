//! Task and category operations through the public repository API.

use super::helpers::{Workspace, create_task, create_tasks, titles, workspace};
use chrono::{NaiveDate, TimeZone, Utc};
use eyre::{Result, eyre};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use taskpilot::task::{
    domain::{
        CategoryId, DueDateRange, Priority, TaskDraft, TaskFilter, TaskPatch, TaskStatus,
    },
    services::{TaskRepository, TaskRepositoryError},
};

#[rstest]
fn created_tasks_survive_a_new_repository_over_the_same_store(workspace: Workspace) -> Result<()> {
    let created = create_tasks(&workspace.repository, &["Draft outline", "Book venue"])?;
    let reopened = TaskRepository::new(Arc::new(workspace.store.clone()), Arc::new(DefaultClock));

    let listed = reopened.list()?;

    assert_eq!(listed, created);
    Ok(())
}

#[rstest]
fn update_changes_fields_and_keeps_identity(workspace: Workspace) -> Result<()> {
    let task = create_task(&workspace.repository, "Write report")?;
    let patch = TaskPatch::new()
        .with_status(TaskStatus::InProgress)
        .with_priority(Priority::Urgent)
        .with_title("Write final report")?;

    let updated = workspace
        .repository
        .update(task.id(), patch)?
        .ok_or_else(|| eyre!("task should exist"))?;

    assert_eq!(updated.id(), task.id());
    assert_eq!(updated.title(), "Write final report");
    assert_eq!(updated.status(), TaskStatus::InProgress);
    assert_eq!(updated.created_at(), task.created_at());
    assert!(updated.updated_at() >= task.updated_at());
    Ok(())
}

#[rstest]
fn query_combines_predicates(workspace: Workspace) -> Result<()> {
    let due = Utc
        .with_ymd_and_hms(2024, 5, 10, 17, 0, 0)
        .single()
        .ok_or_else(|| eyre!("valid due date"))?;
    workspace.repository.create(
        TaskDraft::new("Prepare slides")?
            .with_priority(Priority::High)
            .with_due_date(due),
    )?;
    workspace
        .repository
        .create(TaskDraft::new("Prepare lunch")?.with_priority(Priority::Low))?;
    workspace
        .repository
        .create(TaskDraft::new("Review slides")?.with_priority(Priority::High))?;
    let day = NaiveDate::from_ymd_opt(2024, 5, 10).ok_or_else(|| eyre!("valid day"))?;

    let by_search = workspace
        .repository
        .query(&TaskFilter::new().with_search("PREPARE"))?;
    let by_priority_and_due = workspace.repository.query(
        &TaskFilter::new()
            .with_priorities([Priority::High])
            .with_due(DueDateRange::on(day)),
    )?;

    assert_eq!(titles(&by_search), ["Prepare slides", "Prepare lunch"]);
    assert_eq!(titles(&by_priority_and_due), ["Prepare slides"]);
    Ok(())
}

#[rstest]
fn deleting_a_category_moves_its_tasks_to_the_default(workspace: Workspace) -> Result<()> {
    let chores = workspace.repository.create_category("Chores", "#FF9800")?;
    let task = workspace.repository.create(
        TaskDraft::new("Pick up parcel")?.with_category(chores.id().clone()),
    )?;

    let deleted = workspace.repository.delete_category(chores.id())?;
    let moved = workspace
        .repository
        .get(task.id())?
        .ok_or_else(|| eyre!("task should exist"))?;

    assert!(deleted);
    assert_eq!(moved.category(), &CategoryId::default_category());
    assert!(
        workspace
            .repository
            .list_categories()?
            .iter()
            .all(|category| category.id() != chores.id())
    );
    Ok(())
}

#[rstest]
fn default_category_cannot_be_deleted(workspace: Workspace) {
    let result = workspace
        .repository
        .delete_category(&CategoryId::default_category());

    assert!(matches!(
        result,
        Err(TaskRepositoryError::DefaultCategoryProtected(_))
    ));
}

#[rstest]
fn productivity_stats_reflect_completed_tasks(workspace: Workspace) -> Result<()> {
    let task = workspace
        .repository
        .create(TaskDraft::new("Ship release")?.with_estimated_time(60))?;
    workspace.repository.update(
        task.id(),
        TaskPatch::new()
            .with_status(TaskStatus::Completed)
            .with_actual_time(90),
    )?;
    create_task(&workspace.repository, "Still pending")?;

    let stats = workspace.repository.productivity_stats()?;

    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.total_completed, 1);
    assert_eq!(stats.accuracy.underestimated, 1);
    Ok(())
}
