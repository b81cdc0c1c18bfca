//! Shared fixtures for suggestion unit tests.

use crate::suggestion::{
    config::InferenceConfig,
    domain::ModelName,
    ports::{InferenceResult, InferenceService},
};
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub Inference {}

    #[async_trait]
    impl InferenceService for Inference {
        async fn complete(&self, model: &ModelName, prompt: &str) -> InferenceResult<String>;
    }
}

pub fn model(name: &str) -> ModelName {
    ModelName::new(name).expect("valid model name")
}

pub fn models(names: &[&str]) -> Vec<ModelName> {
    names.iter().map(|name| model(name)).collect()
}

pub fn config_with(names: &[&str]) -> InferenceConfig {
    InferenceConfig::default().with_candidate_models(models(names))
}

/// Builds a task record with a fixed identifier.
pub fn task(id: &str, title: &str) -> Task {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "estimatedTime": 30,
        "createdAt": "2024-03-04T09:00:00Z",
        "updatedAt": "2024-03-04T09:00:00Z",
    }))
    .expect("task record deserializes")
}

pub fn ids(raw: &[&str]) -> Vec<TaskId> {
    raw.iter().map(|id| TaskId::from(*id)).collect()
}
