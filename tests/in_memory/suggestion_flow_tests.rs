//! Suggestions applied to stored tasks.
//!
//! The suggestion service never writes; these tests show callers applying
//! its results through the repository and the store staying untouched when
//! a suggestion fails.

use super::helpers::{Workspace, create_task, create_tasks, suggestion_service, workspace};
use eyre::{Result, eyre};
use rstest::rstest;
use std::sync::Arc;
use taskpilot::{
    suggestion::{adapters::ScriptedInferenceService, domain::ModelName, services::SuggestionError},
    task::domain::{CategoryId, Priority, Task, TaskDraft},
};

#[rstest]
#[tokio::test]
async fn accepted_analysis_updates_task_and_creates_category(workspace: Workspace) -> Result<()> {
    let task = create_task(&workspace.repository, "Sketch garden shed")?;
    let inference = Arc::new(ScriptedInferenceService::new().with_reply(
        r#"```json
{"priority": "high", "category": "Side Projects", "estimatedTime": 45, "reasoning": "Weekend only"}
```"#,
    ));
    let suggestions = suggestion_service(&inference)?;

    let analysis = suggestions.analyze_task(task.title(), task.description()).await?;
    if let Some(name) = analysis.category.as_deref() {
        workspace.repository.ensure_category(name)?;
    }
    let updated = workspace
        .repository
        .update(task.id(), analysis.to_patch())?
        .ok_or_else(|| eyre!("task should exist"))?;

    assert_eq!(updated.priority(), Priority::High);
    assert_eq!(updated.category(), &CategoryId::from("side-projects"));
    assert_eq!(updated.estimated_time(), Some(45));
    assert_eq!(
        updated
            .ai_suggestions()
            .and_then(|snapshot| snapshot.reason.as_deref()),
        Some("Weekend only")
    );
    assert!(
        workspace
            .repository
            .list_categories()?
            .iter()
            .any(|category| category.name() == "Side Projects")
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn failed_suggestion_leaves_tasks_untouched(workspace: Workspace) -> Result<()> {
    let before = create_tasks(&workspace.repository, &["Call plumber", "Pay invoice"])?;
    let inference = Arc::new(ScriptedInferenceService::new().with_rejected_credential());
    let suggestions = suggestion_service(&inference)?;

    let result = suggestions.propose_schedule(&before).await;

    assert!(matches!(result, Err(SuggestionError::InvalidCredential(_))));
    assert_eq!(workspace.repository.list()?, before);
    Ok(())
}

#[rstest]
#[case("{\"priority\": \"high\"")]
#[case("Sure! {\"priority\": }")]
#[case("}{")]
#[tokio::test]
async fn malformed_reply_leaves_tasks_untouched(
    workspace: Workspace,
    #[case] reply: &str,
) -> Result<()> {
    let before = create_tasks(&workspace.repository, &["Call plumber", "Pay invoice"])?;
    let inference = Arc::new(ScriptedInferenceService::new().with_reply(reply));
    let suggestions = suggestion_service(&inference)?;

    let result = suggestions
        .analyze_task("Call plumber", "Leaking tap")
        .await;

    assert!(matches!(
        result,
        Err(SuggestionError::UnparsableResponse { .. })
    ));
    assert_eq!(workspace.repository.list()?, before);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unavailable_primary_model_falls_back(workspace: Workspace) -> Result<()> {
    let task = create_task(&workspace.repository, "Renew passport")?;
    let inference = Arc::new(
        ScriptedInferenceService::new()
            .with_unavailable_model(&ModelName::new("primary")?)
            .with_reply(r#"{"priority": "urgent"}"#),
    );
    let suggestions = suggestion_service(&inference)?;

    let analysis = suggestions.analyze_task(task.title(), "").await?;

    assert_eq!(analysis.priority, Some(Priority::Urgent));
    assert_eq!(
        suggestions.active_model().await,
        Some(ModelName::new("fallback")?)
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn suggested_subtasks_become_dependencies(workspace: Workspace) -> Result<()> {
    let parent = create_task(&workspace.repository, "Move house")?;
    let inference = Arc::new(
        ScriptedInferenceService::new()
            .with_reply(r#"["Book van", "Pack boxes", "Redirect post"]"#),
    );
    let suggestions = suggestion_service(&inference)?;

    let subtasks = suggestions.suggest_subtasks("Move house").await?;
    let mut children: Vec<Task> = Vec::new();
    for title in subtasks.as_slice() {
        let child = workspace
            .repository
            .create(TaskDraft::new(title.as_str())?.ai_generated())?;
        workspace.repository.add_dependency(parent.id(), child.id())?;
        children.push(child);
    }

    let closure = workspace.repository.transitive_closure(parent.id())?;
    let expected: Vec<_> = children.iter().map(|child| child.id().clone()).collect();
    assert_eq!(closure, expected);
    assert!(children.iter().all(Task::ai_generated));
    Ok(())
}
