//! Checks that the configured inference service is reachable.
//!
//! Usage:
//!
//! ```text
//! taskpilot-probe [check | analyze <title> [description]]
//! ```
//!
//! `check` (the default) negotiates a model from the configured candidate
//! list and sends the connection check prompt. `analyze` additionally runs a
//! task analysis and logs the suggested fields. Configuration is read from
//! the `TASKPILOT_*` environment variables; output goes through `tracing`
//! and honours `RUST_LOG`.

use std::env;
use std::sync::Arc;

use taskpilot::{
    suggestion::{
        adapters::GeminiInferenceService,
        config::{ConfigError, InferenceConfig},
        ports::InferenceError,
        services::{SuggestionError, SuggestionService},
    },
    telemetry::init_tracing,
};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{error, info};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while probing.
#[derive(Debug, Error)]
enum ProbeError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] InferenceError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
    #[error("connection check reply did not contain the expected marker")]
    CheckFailed,
}

#[derive(Debug)]
enum Command {
    Check,
    Analyze { title: String, description: String },
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ProbeError> {
        match args.next().as_deref() {
            None | Some("check") => Ok(Self::Check),
            Some("analyze") => {
                let title = args.next().ok_or_else(|| {
                    ProbeError::InvalidArgs("analyze requires a task title".to_owned())
                })?;
                Ok(Self::Analyze {
                    title,
                    description: args.next().unwrap_or_default(),
                })
            }
            Some(other) => Err(ProbeError::InvalidArgs(format!(
                "unknown command '{other}'; expected check or analyze"
            ))),
        }
    }
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    run().map_err(|err| {
        error!(error = %err, "probe failed");
        err.into()
    })
}

fn run() -> Result<(), ProbeError> {
    let command = Command::parse(env::args().skip(1))?;
    let config = InferenceConfig::from_env()?;
    let inference = GeminiInferenceService::new(&config).map_err(ProbeError::Client)?;
    let service = SuggestionService::new(Arc::new(inference), &config);
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ProbeError::RuntimeInit)?;

    runtime.block_on(async {
        if !service.test_connection().await? {
            return Err(ProbeError::CheckFailed);
        }
        if let Some(model) = service.active_model().await {
            info!(model = %model, "connection check succeeded");
        }
        if let Command::Analyze { title, description } = command {
            let analysis = service.analyze_task(&title, &description).await?;
            info!(
                priority = ?analysis.priority,
                category = ?analysis.category,
                estimated_minutes = ?analysis.estimated_time,
                deadline = ?analysis.suggested_deadline,
                reason = ?analysis.reason,
                "task analysis"
            );
        }
        Ok(())
    })
}
