//! Suggestion-producing operations.
//!
//! Every operation has the same shape: render a deterministic prompt from
//! caller-supplied task data, send it to the negotiated model, reduce the
//! reply to JSON and map it onto a typed result, discarding fields that fail
//! their checks. Nothing here touches the task repository.

use super::{ModelNegotiator, SuggestionError, SuggestionResult};
use crate::{
    suggestion::{
        config::InferenceConfig,
        domain::{
            DailySummary, MAX_SUBTASKS, ModelName, RecurrenceDetection, RelatedTasks,
            ScheduleProposal, Subtasks, TaskAnalysis,
        },
        parsing::{JsonShape, fields, parse_reply},
        ports::InferenceService,
        prompts,
    },
    task::domain::{RecurrenceFrequency, RecurringPattern, Task, TaskId},
};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

const ANALYZE: &str = "task analysis";
const SCHEDULE: &str = "schedule";
const RECURRENCE: &str = "recurrence detection";
const RELATED: &str = "related tasks";
const SUMMARY: &str = "daily summary";
const SUBTASKS: &str = "subtasks";
const INSIGHTS: &str = "productivity insights";

/// Reply marker expected from [`SuggestionService::test_connection`].
pub const CONNECTION_MARKER: &str = "CONNECTION_SUCCESSFUL";

/// Insight replies shorter than this are treated as unusable.
const MIN_INSIGHT_CHARS: usize = 10;

/// Suggestion service over a negotiated inference model.
pub struct SuggestionService<I>
where
    I: InferenceService,
{
    negotiator: ModelNegotiator<I>,
    recurrence_threshold: f64,
}

impl<I> SuggestionService<I>
where
    I: InferenceService,
{
    /// Creates a service using the configured candidates and threshold.
    #[must_use]
    pub fn new(inference: Arc<I>, config: &InferenceConfig) -> Self {
        Self {
            negotiator: ModelNegotiator::new(inference, config.candidate_models.clone()),
            recurrence_threshold: config.recurrence_confidence_threshold,
        }
    }

    /// Returns the negotiated model, if negotiation has happened.
    pub async fn active_model(&self) -> Option<ModelName> {
        self.negotiator.bound_model().await
    }

    /// Suggests priority, category, estimate and deadline for a task.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::UnparsableResponse`] when the reply is not
    /// a JSON object, [`SuggestionError::EmptySuggestion`] when no field
    /// passes validation, or a negotiation/inference error.
    pub async fn analyze_task(
        &self,
        title: &str,
        description: &str,
    ) -> SuggestionResult<TaskAnalysis> {
        let prompt = prompts::analyze_task(title, description)
            .map_err(|err| SuggestionError::prompt(ANALYZE, &err))?;
        let reply = self.structured(ANALYZE, JsonShape::Object, &prompt).await?;
        let object = expect_object(ANALYZE, &reply)?;

        let analysis = TaskAnalysis {
            priority: fields::lookup(object, &["priority"]).and_then(fields::priority),
            category: fields::lookup(object, &["category"]).and_then(fields::text),
            estimated_time: fields::lookup(object, &["estimatedTime", "estimatedMinutes"])
                .and_then(fields::minutes),
            suggested_deadline: fields::lookup(object, &["suggestedDeadline", "deadline"])
                .and_then(fields::deadline),
            reason: fields::lookup(object, &["reasoning", "reason"]).and_then(fields::text),
        };
        if analysis.is_empty() {
            return Err(SuggestionError::EmptySuggestion { operation: ANALYZE });
        }
        Ok(analysis)
    }

    /// Suggests an execution order and a day-by-day plan for `tasks`.
    ///
    /// Identifiers outside `tasks` and day keys that are not calendar dates
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::UnparsableResponse`] when the reply is not
    /// a JSON object, [`SuggestionError::EmptySuggestion`] when nothing
    /// usable is scheduled, or a negotiation/inference error.
    pub async fn propose_schedule(&self, tasks: &[Task]) -> SuggestionResult<ScheduleProposal> {
        let prompt = prompts::propose_schedule(tasks)
            .map_err(|err| SuggestionError::prompt(SCHEDULE, &err))?;
        let reply = self.structured(SCHEDULE, JsonShape::Object, &prompt).await?;
        let object = expect_object(SCHEDULE, &reply)?;
        let known = known_ids(tasks);

        let recommended_sequence = fields::lookup(object, &["recommendedSequence"])
            .map(|value| fields::known_ids(value, &known))
            .unwrap_or_default();
        let mut daily_plan: BTreeMap<NaiveDate, Vec<TaskId>> = BTreeMap::new();
        if let Some(Value::Object(plan)) = fields::lookup(object, &["dailyPlan"]) {
            for (key, ids) in plan {
                let Some(day) = fields::calendar_date(key) else {
                    debug!(key = %key, "dropping schedule day with unreadable date");
                    continue;
                };
                let scheduled = fields::known_ids(ids, &known);
                if !scheduled.is_empty() {
                    daily_plan.entry(day).or_default().extend(scheduled);
                }
            }
        }
        let proposal = ScheduleProposal {
            recommended_sequence,
            daily_plan,
            reasoning: fields::lookup(object, &["reasoning", "reason"]).and_then(fields::text),
        };
        if proposal.is_empty() {
            return Err(SuggestionError::EmptySuggestion {
                operation: SCHEDULE,
            });
        }
        Ok(proposal)
    }

    /// Decides whether `task` repeats, using `history` as evidence.
    ///
    /// Returns `Ok(None)` when the model finds no pattern, reports a
    /// confidence below the configured threshold, or names no valid
    /// frequency.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::UnparsableResponse`] when the reply is not
    /// a JSON object, or a negotiation/inference error.
    pub async fn detect_recurring_pattern(
        &self,
        task: &Task,
        history: &[Task],
    ) -> SuggestionResult<Option<RecurrenceDetection>> {
        let prompt = prompts::detect_recurrence(task, history)
            .map_err(|err| SuggestionError::prompt(RECURRENCE, &err))?;
        let reply = self.structured(RECURRENCE, JsonShape::Object, &prompt).await?;
        let object = expect_object(RECURRENCE, &reply)?;

        if fields::lookup(object, &["isRecurring"]).and_then(Value::as_bool) == Some(false) {
            return Ok(None);
        }
        let Some(confidence) = fields::lookup(object, &["confidence"]).and_then(fields::confidence)
        else {
            return Ok(None);
        };
        if confidence < self.recurrence_threshold {
            debug!(confidence, threshold = self.recurrence_threshold, "recurrence below threshold");
            return Ok(None);
        }
        Ok(recurring_pattern(object).map(|pattern| RecurrenceDetection {
            pattern,
            confidence,
        }))
    }

    /// Recommends tasks from `candidates` that relate to `task`.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::UnparsableResponse`] when the reply is not
    /// a JSON object, or a negotiation/inference error.
    pub async fn recommend_related(
        &self,
        task: &Task,
        candidates: &[Task],
    ) -> SuggestionResult<RelatedTasks> {
        let prompt = prompts::recommend_related(task, candidates)
            .map_err(|err| SuggestionError::prompt(RELATED, &err))?;
        let reply = self.structured(RELATED, JsonShape::Object, &prompt).await?;
        let object = expect_object(RELATED, &reply)?;
        let mut known = known_ids(candidates);
        known.remove(task.id());

        Ok(RelatedTasks {
            task_ids: fields::lookup(object, &["relatedTaskIds", "relatedTasks"])
                .map(|value| fields::known_ids(value, &known))
                .unwrap_or_default(),
            reasoning: fields::lookup(object, &["reasoning", "reason"]).and_then(fields::text),
        })
    }

    /// Summarises the plan for `day` over `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::UnparsableResponse`] when the reply is not
    /// a JSON object, [`SuggestionError::EmptySuggestion`] when it has no
    /// summary text, or a negotiation/inference error.
    pub async fn daily_summary(
        &self,
        day: NaiveDate,
        tasks: &[Task],
    ) -> SuggestionResult<DailySummary> {
        let prompt = prompts::daily_summary(day, tasks)
            .map_err(|err| SuggestionError::prompt(SUMMARY, &err))?;
        let reply = self.structured(SUMMARY, JsonShape::Object, &prompt).await?;
        let object = expect_object(SUMMARY, &reply)?;
        let known = known_ids(tasks);

        let Some(summary) = fields::lookup(object, &["summary"]).and_then(fields::text) else {
            return Err(SuggestionError::EmptySuggestion { operation: SUMMARY });
        };
        Ok(DailySummary {
            day,
            summary,
            focus_task_ids: fields::lookup(object, &["focusTaskIds"])
                .map(|value| fields::known_ids(value, &known))
                .unwrap_or_default(),
            tips: fields::lookup(object, &["tips"])
                .map(fields::strings)
                .unwrap_or_default(),
        })
    }

    /// Suggests up to [`MAX_SUBTASKS`] subtasks for a task description.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::UnparsableResponse`] when the reply is not
    /// a JSON array, [`SuggestionError::EmptySuggestion`] when it holds no
    /// non-blank string, or a negotiation/inference error.
    pub async fn suggest_subtasks(&self, description: &str) -> SuggestionResult<Subtasks> {
        let prompt = prompts::suggest_subtasks(description, MAX_SUBTASKS)
            .map_err(|err| SuggestionError::prompt(SUBTASKS, &err))?;
        let reply = self.structured(SUBTASKS, JsonShape::Array, &prompt).await?;
        if !reply.is_array() {
            return Err(SuggestionError::unparsable(SUBTASKS, "expected a JSON array"));
        }
        let subtasks = Subtasks::new(fields::strings(&reply));
        if subtasks.is_empty() {
            return Err(SuggestionError::EmptySuggestion {
                operation: SUBTASKS,
            });
        }
        Ok(subtasks)
    }

    /// Produces free-text insights over completed tasks.
    ///
    /// Returns `Ok(None)` without calling the model when `completed` is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::UnparsableResponse`] when the reply is too
    /// short to be meaningful, or a negotiation/inference error.
    pub async fn productivity_insights(
        &self,
        completed: &[Task],
    ) -> SuggestionResult<Option<String>> {
        if completed.is_empty() {
            return Ok(None);
        }
        let prompt = prompts::productivity_insights(completed)
            .map_err(|err| SuggestionError::prompt(INSIGHTS, &err))?;
        let reply = self.negotiator.complete(&prompt).await?;
        let insights = reply.trim();
        let chars = insights.chars().count();
        if chars < MIN_INSIGHT_CHARS {
            warn!(chars, "insight reply too short");
            return Err(SuggestionError::unparsable(INSIGHTS, "reply too short"));
        }
        Ok(Some(insights.to_owned()))
    }

    /// Negotiates a model if needed and checks that it echoes the
    /// connection marker.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError`] when negotiation or the check request
    /// fails.
    pub async fn test_connection(&self) -> SuggestionResult<bool> {
        let reply = self
            .negotiator
            .complete(prompts::CONNECTION_CHECK_PROMPT)
            .await?;
        Ok(reply.contains(CONNECTION_MARKER))
    }

    async fn structured(
        &self,
        operation: &'static str,
        shape: JsonShape,
        prompt: &str,
    ) -> SuggestionResult<Value> {
        let reply = self.negotiator.complete(prompt).await?;
        parse_reply(&reply, shape).map_err(|err| {
            warn!(operation, error = %err, "discarding unparsable model reply");
            SuggestionError::unparsable(operation, err.reason)
        })
    }
}

fn expect_object<'a>(
    operation: &'static str,
    reply: &'a Value,
) -> SuggestionResult<&'a Value> {
    if reply.is_object() {
        Ok(reply)
    } else {
        Err(SuggestionError::unparsable(operation, "expected a JSON object"))
    }
}

fn known_ids(tasks: &[Task]) -> HashSet<&TaskId> {
    tasks.iter().map(Task::id).collect()
}

fn recurring_pattern(object: &Value) -> Option<RecurringPattern> {
    let frequency = fields::lookup(object, &["frequency"])
        .and_then(Value::as_str)
        .and_then(|raw| RecurrenceFrequency::try_from(raw).ok())?;
    let interval = fields::lookup(object, &["interval"])
        .and_then(Value::as_u64)
        .and_then(|raw| u32::try_from(raw).ok())
        .filter(|interval| *interval > 0)
        .unwrap_or(1);
    let mut pattern = RecurringPattern::new(frequency, interval).ok()?;

    if let Some(days) = fields::lookup(object, &["daysOfWeek"]).and_then(Value::as_array) {
        pattern = pattern.with_days_of_week(days.iter().filter_map(fields::weekday));
    }
    if let Some(day) = fields::lookup(object, &["dayOfMonth"])
        .and_then(|value| fields::bounded_u8(value, 1, 31))
    {
        pattern = pattern.clone().with_day_of_month(day).unwrap_or(pattern);
    }
    if let Some(month) = fields::lookup(object, &["monthOfYear"])
        .and_then(|value| fields::bounded_u8(value, 1, 12))
    {
        pattern = pattern.clone().with_month_of_year(month).unwrap_or(pattern);
    }
    Some(pattern)
}
