//! Recurrence metadata for repeating tasks.

use super::{ParseFrequencyError, TaskDomainError};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// How often a recurring task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    /// Every `interval` days.
    Daily,
    /// Every `interval` weeks.
    Weekly,
    /// Every `interval` months.
    Monthly,
    /// Every `interval` years.
    Yearly,
}

impl RecurrenceFrequency {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl TryFrom<&str> for RecurrenceFrequency {
    type Error = ParseFrequencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annually" => Ok(Self::Yearly),
            _ => Err(ParseFrequencyError(value.to_owned())),
        }
    }
}

/// Repetition rule attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPattern {
    frequency: RecurrenceFrequency,
    interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    days_of_week: Option<Vec<Weekday>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day_of_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    month_of_year: Option<u8>,
}

impl RecurringPattern {
    /// Creates a pattern repeating every `interval` units of `frequency`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRecurrenceInterval`] when the
    /// interval is zero.
    pub const fn new(
        frequency: RecurrenceFrequency,
        interval: u32,
    ) -> Result<Self, TaskDomainError> {
        if interval == 0 {
            return Err(TaskDomainError::InvalidRecurrenceInterval);
        }
        Ok(Self {
            frequency,
            interval,
            days_of_week: None,
            day_of_month: None,
            month_of_year: None,
        })
    }

    /// Restricts the pattern to the given weekdays. Duplicates are dropped.
    #[must_use]
    pub fn with_days_of_week(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut unique: Vec<Weekday> = Vec::new();
        for day in days {
            if !unique.contains(&day) {
                unique.push(day);
            }
        }
        self.days_of_week = if unique.is_empty() { None } else { Some(unique) };
        self
    }

    /// Pins the pattern to a day of the month.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDayOfMonth`] outside `1..=31`.
    pub fn with_day_of_month(mut self, day: u8) -> Result<Self, TaskDomainError> {
        if !(1..=31).contains(&day) {
            return Err(TaskDomainError::InvalidDayOfMonth(day));
        }
        self.day_of_month = Some(day);
        Ok(self)
    }

    /// Pins the pattern to a month of the year.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidMonthOfYear`] outside `1..=12`.
    pub fn with_month_of_year(mut self, month: u8) -> Result<Self, TaskDomainError> {
        if !(1..=12).contains(&month) {
            return Err(TaskDomainError::InvalidMonthOfYear(month));
        }
        self.month_of_year = Some(month);
        Ok(self)
    }

    /// Returns the repetition unit.
    #[must_use]
    pub const fn frequency(&self) -> RecurrenceFrequency {
        self.frequency
    }

    /// Returns the number of units between repetitions.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns the weekdays the pattern is restricted to, if any.
    #[must_use]
    pub fn days_of_week(&self) -> Option<&[Weekday]> {
        self.days_of_week.as_deref()
    }

    /// Returns the pinned day of month, if any.
    #[must_use]
    pub const fn day_of_month(&self) -> Option<u8> {
        self.day_of_month
    }

    /// Returns the pinned month of year, if any.
    #[must_use]
    pub const fn month_of_year(&self) -> Option<u8> {
        self.month_of_year
    }
}
