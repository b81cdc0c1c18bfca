//! Completion statistics derived from the task collection.

use super::{Task, TaskStatus};
use chrono::{Datelike, Timelike};
use std::cmp::Ordering;

/// How estimates compared with recorded time on completed tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimateAccuracy {
    /// Estimate was larger than the actual time.
    pub overestimated: u32,
    /// Estimate was smaller than the actual time.
    pub underestimated: u32,
    /// Estimate matched the actual time exactly.
    pub accurate: u32,
}

/// Aggregate view of completed work.
///
/// Completion moments are approximated by `updated_at`, read in UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductivityStats {
    /// Completed tasks per weekday, Sunday first.
    pub day_of_week_counts: [u32; 7],
    /// Completed tasks per hour of day.
    pub hour_counts: [u32; 24],
    /// Estimate accuracy over completed tasks with both times recorded.
    pub accuracy: EstimateAccuracy,
    /// Number of completed tasks.
    pub total_completed: u32,
    /// Number of tasks in the collection.
    pub total_tasks: u32,
}

impl ProductivityStats {
    /// Computes statistics over a task collection.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut stats = Self {
            total_tasks: u32::try_from(tasks.len()).unwrap_or(u32::MAX),
            ..Self::default()
        };

        for task in tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Completed)
        {
            stats.total_completed = stats.total_completed.saturating_add(1);
            let completed_at = task.updated_at();
            bump(
                &mut stats.day_of_week_counts,
                completed_at.weekday().num_days_from_sunday(),
            );
            bump(&mut stats.hour_counts, completed_at.hour());

            if let (Some(estimated), Some(actual)) = (task.estimated_time(), task.actual_time()) {
                let bucket = match estimated.cmp(&actual) {
                    Ordering::Greater => &mut stats.accuracy.overestimated,
                    Ordering::Less => &mut stats.accuracy.underestimated,
                    Ordering::Equal => &mut stats.accuracy.accurate,
                };
                *bucket = bucket.saturating_add(1);
            }
        }
        stats
    }
}

fn bump(counts: &mut [u32], index: u32) {
    let slot = usize::try_from(index)
        .ok()
        .and_then(|position| counts.get_mut(position));
    if let Some(count) = slot {
        *count = count.saturating_add(1);
    }
}
