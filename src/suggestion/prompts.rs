//! Deterministic prompt templates.
//!
//! Prompts are rendered from fixed templates and caller-supplied task data
//! only, so the same input always yields the same prompt text.

use crate::task::domain::Task;
use chrono::NaiveDate;
use minijinja::Environment;
use serde::Serialize;
use serde_json::{Value, json};

pub(crate) const CONNECTION_CHECK_PROMPT: &str =
    "Return 'CONNECTION_SUCCESSFUL' if you can read this message";

const ANALYZE_TASK: &str = "\
Analyze this task and provide suggestions for priority level, category, time estimation and a deadline:

Task Title: {{ title }}
Task Description: {{ description }}

Format your response as a JSON object with these fields:
- priority (must be one of: low, medium, high, urgent)
- category (suggest an appropriate task category)
- estimatedTime (estimated time to complete in minutes, as a number)
- suggestedDeadline (ISO 8601 date, only if the task implies one)
- reasoning (brief explanation for your suggestions)

Only return the JSON object, no other text.";

const PROPOSE_SCHEDULE: &str = "\
Given these tasks, suggest an optimal schedule for completing them:

Tasks: {{ tasks }}

Consider:
- Priority levels
- Due dates
- Estimated time to complete
- Current status

Format your response as a JSON object with these fields:
- recommendedSequence (array of task IDs in the suggested order)
- dailyPlan (object with dates as YYYY-MM-DD keys and arrays of task IDs as values)
- reasoning (brief explanation for your suggestions)

Only return the JSON object, no other text.";

const DETECT_RECURRENCE: &str = "\
Decide whether this task is part of a recurring pattern, using the related tasks as history:

Task: {{ task }}
History: {{ history }}

Format your response as a JSON object with these fields:
- isRecurring (true or false)
- confidence (number between 0 and 1)
- frequency (one of: daily, weekly, monthly, yearly)
- interval (repeat every N units, as a number)
- daysOfWeek (optional array of weekday names)
- dayOfMonth (optional number between 1 and 31)
- monthOfYear (optional number between 1 and 12)

Only return the JSON object, no other text.";

const RECOMMEND_RELATED: &str = "\
Find the tasks that are related to the subject task, for example because they share a goal or should be done together:

Subject: {{ task }}
Candidates: {{ candidates }}

Format your response as a JSON object with these fields:
- relatedTaskIds (array of candidate task IDs, most related first)
- reasoning (brief explanation)

Only return the JSON object, no other text.";

const DAILY_SUMMARY: &str = "\
Summarize the plan for {{ day }} based on these tasks:

Tasks: {{ tasks }}

Format your response as a JSON object with these fields:
- summary (one short paragraph)
- focusTaskIds (array of task IDs to focus on first)
- tips (array of short productivity tips)

Only return the JSON object, no other text.";

const SUGGEST_SUBTASKS: &str = "\
Based on this task description, suggest up to {{ limit }} logical subtasks that would help complete this task efficiently:

Task Description: {{ description }}

Format your response as a JSON array of strings with each subtask. Only return the JSON array, no other text.";

const PRODUCTIVITY_INSIGHTS: &str = "\
Analyze these completed tasks and provide productivity insights:

Tasks: {{ tasks }}

Provide insights on:
1. Time estimation accuracy (comparing estimated vs actual times)
2. Productivity patterns (times of day, days of week, etc.)
3. Suggestions for improving productivity

If there is not enough data for any section, please indicate this politely.
Format your response as a string with paragraphs separated by newlines, with clear section headers.";

/// Task fields shared with the model.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptTask<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    priority: &'static str,
    status: &'static str,
    category: &'a str,
    estimated_time: Option<u32>,
    actual_time: Option<u32>,
    due_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl<'a> From<&'a Task> for PromptTask<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id().as_str(),
            title: task.title(),
            description: task.description(),
            priority: task.priority().as_str(),
            status: task.status().as_str(),
            category: task.category().as_str(),
            estimated_time: task.estimated_time(),
            actual_time: task.actual_time(),
            due_date: task.due_date().map(|due| due.to_rfc3339()),
            created_at: task.created_at().to_rfc3339(),
            updated_at: task.updated_at().to_rfc3339(),
        }
    }
}

fn task_json(task: &Task) -> Result<String, minijinja::Error> {
    serde_json::to_string(&PromptTask::from(task)).map_err(encode_error)
}

fn tasks_json(tasks: &[Task]) -> Result<String, minijinja::Error> {
    let records: Vec<PromptTask<'_>> = tasks.iter().map(PromptTask::from).collect();
    serde_json::to_string(&records).map_err(encode_error)
}

fn encode_error(err: serde_json::Error) -> minijinja::Error {
    minijinja::Error::new(minijinja::ErrorKind::BadSerialization, err.to_string())
}

fn render(template: &str, context: Value) -> Result<String, minijinja::Error> {
    Environment::new().render_str(template, context)
}

pub(crate) fn analyze_task(title: &str, description: &str) -> Result<String, minijinja::Error> {
    render(
        ANALYZE_TASK,
        json!({ "title": title, "description": description }),
    )
}

pub(crate) fn propose_schedule(tasks: &[Task]) -> Result<String, minijinja::Error> {
    render(PROPOSE_SCHEDULE, json!({ "tasks": tasks_json(tasks)? }))
}

pub(crate) fn detect_recurrence(task: &Task, history: &[Task]) -> Result<String, minijinja::Error> {
    render(
        DETECT_RECURRENCE,
        json!({ "task": task_json(task)?, "history": tasks_json(history)? }),
    )
}

pub(crate) fn recommend_related(
    task: &Task,
    candidates: &[Task],
) -> Result<String, minijinja::Error> {
    render(
        RECOMMEND_RELATED,
        json!({ "task": task_json(task)?, "candidates": tasks_json(candidates)? }),
    )
}

pub(crate) fn daily_summary(day: NaiveDate, tasks: &[Task]) -> Result<String, minijinja::Error> {
    render(
        DAILY_SUMMARY,
        json!({ "day": day.format("%Y-%m-%d").to_string(), "tasks": tasks_json(tasks)? }),
    )
}

pub(crate) fn suggest_subtasks(description: &str, limit: usize) -> Result<String, minijinja::Error> {
    render(
        SUGGEST_SUBTASKS,
        json!({ "description": description, "limit": limit }),
    )
}

pub(crate) fn productivity_insights(completed: &[Task]) -> Result<String, minijinja::Error> {
    render(PRODUCTIVITY_INSIGHTS, json!({ "tasks": tasks_json(completed)? }))
}
