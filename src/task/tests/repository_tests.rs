//! Repository tests for task persistence and lifecycle operations.

use super::support::{RepositoryHarness, harness};
use crate::task::{
    domain::{Priority, TaskDraft, TaskId, TaskPatch, TaskStatus},
    ports::{BlobKey, BlobStore},
};
use rstest::rstest;

#[rstest]
fn cold_start_lists_nothing_and_writes_nothing(harness: RepositoryHarness) {
    let tasks = harness.repository.list().expect("list succeeds");

    assert!(tasks.is_empty());
    assert_eq!(harness.store.is_empty().ok(), Some(true));
}

#[rstest]
fn created_task_round_trips_through_the_store(harness: RepositoryHarness) {
    let draft = TaskDraft::new("Water plants")
        .expect("valid draft")
        .with_priority(Priority::Low)
        .with_estimated_time(10);

    let created = harness.repository.create(draft).expect("create succeeds");
    let fetched = harness
        .repository
        .get(created.id())
        .expect("get succeeds");

    assert_eq!(fetched, Some(created));
}

#[rstest]
fn list_preserves_insertion_order(harness: RepositoryHarness) {
    let titles = ["first", "second", "third"];
    for title in titles {
        harness
            .repository
            .create(TaskDraft::new(title).expect("valid draft"))
            .expect("create succeeds");
    }

    let listed: Vec<String> = harness
        .repository
        .list()
        .expect("list succeeds")
        .iter()
        .map(|task| task.title().to_owned())
        .collect();

    assert_eq!(listed, titles);
}

#[rstest]
fn update_merges_patch_and_keeps_identity(harness: RepositoryHarness) {
    let created = harness
        .repository
        .create(TaskDraft::new("Draft essay").expect("valid draft"))
        .expect("create succeeds");

    let patch = TaskPatch::new()
        .with_title("Final essay")
        .expect("valid title")
        .with_status(TaskStatus::Completed);
    let updated = harness
        .repository
        .update(created.id(), patch)
        .expect("update succeeds")
        .expect("task exists");

    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.title(), "Final essay");
    assert_eq!(updated.status(), TaskStatus::Completed);
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() > created.updated_at());
    let stored = harness.repository.get(created.id()).expect("get succeeds");
    assert_eq!(stored, Some(updated));
}

#[rstest]
fn update_of_unknown_task_returns_none(harness: RepositoryHarness) {
    let result = harness
        .repository
        .update(&TaskId::from("missing"), TaskPatch::new())
        .expect("update succeeds");

    assert_eq!(result, None);
    assert_eq!(harness.store.is_empty().ok(), Some(true));
}

#[rstest]
fn delete_removes_task_once(harness: RepositoryHarness) {
    let created = harness
        .repository
        .create(TaskDraft::new("Temporary").expect("valid draft"))
        .expect("create succeeds");

    assert_eq!(harness.repository.delete(created.id()).ok(), Some(true));
    assert_eq!(harness.repository.delete(created.id()).ok(), Some(false));
    assert_eq!(harness.repository.get(created.id()).ok(), Some(None));
}

#[rstest]
#[case(b"not json".as_slice())]
#[case(b"{\"tasks\": []}".as_slice())]
#[case(b"[{\"title\": \"no id\"}]".as_slice())]
fn unreadable_blob_is_a_cold_start(harness: RepositoryHarness, #[case] blob: &[u8]) {
    harness
        .store
        .set(&BlobKey::tasks(), blob)
        .expect("seed store");

    assert_eq!(harness.repository.list().ok(), Some(Vec::new()));
}

#[rstest]
fn create_after_corruption_overwrites_the_blob(harness: RepositoryHarness) {
    harness
        .store
        .set(&BlobKey::tasks(), b"garbage")
        .expect("seed store");

    harness
        .repository
        .create(TaskDraft::new("Fresh start").expect("valid draft"))
        .expect("create succeeds");

    let tasks = harness.repository.list().expect("list succeeds");
    assert_eq!(tasks.len(), 1);
}

#[rstest]
fn stored_blob_uses_camel_case_keys(harness: RepositoryHarness) {
    let draft = TaskDraft::new("Stretch")
        .expect("valid draft")
        .with_estimated_time(5)
        .ai_generated();
    harness.repository.create(draft).expect("create succeeds");

    let bytes = harness
        .store
        .get(&BlobKey::tasks())
        .expect("get succeeds")
        .expect("blob written");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("blob is JSON");
    let record = value.get(0).expect("one record");

    assert_eq!(record["estimatedTime"], 5);
    assert_eq!(record["aiGenerated"], true);
    assert_eq!(record["category"], "work");
    assert!(record.get("createdAt").is_some_and(serde_json::Value::is_string));
}

#[rstest]
fn log_pomodoro_counts_sessions(harness: RepositoryHarness) {
    let created = harness
        .repository
        .create(TaskDraft::new("Focus block").expect("valid draft"))
        .expect("create succeeds");

    harness
        .repository
        .log_pomodoro(created.id())
        .expect("log succeeds");
    let logged = harness
        .repository
        .log_pomodoro(created.id())
        .expect("log succeeds")
        .expect("task exists");

    assert_eq!(logged.pomodoros_completed(), 2);
    assert_eq!(
        harness
            .repository
            .log_pomodoro(&TaskId::from("missing"))
            .ok(),
        Some(None)
    );
}

#[rstest]
fn productivity_stats_cover_completed_tasks(harness: RepositoryHarness) {
    let accurate = TaskDraft::new("Accurate")
        .expect("valid draft")
        .with_status(TaskStatus::Completed)
        .with_estimated_time(30)
        .with_actual_time(30);
    let over = TaskDraft::new("Over")
        .expect("valid draft")
        .with_status(TaskStatus::Completed)
        .with_estimated_time(60)
        .with_actual_time(20);
    let open = TaskDraft::new("Open").expect("valid draft");
    for draft in [accurate, over, open] {
        harness.repository.create(draft).expect("create succeeds");
    }

    let stats = harness
        .repository
        .productivity_stats()
        .expect("stats succeed");

    assert_eq!(stats.total_tasks, 3);
    assert_eq!(stats.total_completed, 2);
    assert_eq!(stats.accuracy.accurate, 1);
    assert_eq!(stats.accuracy.overestimated, 1);
    assert_eq!(stats.accuracy.underestimated, 0);
    // The stepping clock starts on a Monday at 09:00 UTC.
    assert_eq!(stats.day_of_week_counts.get(1), Some(&2));
    assert_eq!(stats.hour_counts.get(9), Some(&2));
}
