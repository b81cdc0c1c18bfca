//! Schedule proposal suggestion.

use crate::task::domain::TaskId;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Suggested order and day-by-day plan for a set of tasks.
///
/// Only identifiers of tasks that were part of the request are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleProposal {
    /// Tasks in the suggested order of execution.
    pub recommended_sequence: Vec<TaskId>,
    /// Tasks to work on per calendar day.
    pub daily_plan: BTreeMap<NaiveDate, Vec<TaskId>>,
    /// Free-text explanation.
    pub reasoning: Option<String>,
}

impl ScheduleProposal {
    /// Returns whether the proposal schedules nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recommended_sequence.is_empty() && self.daily_plan.is_empty()
    }
}
