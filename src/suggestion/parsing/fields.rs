//! Typed field checks applied to parsed replies.
//!
//! Each check returns `None` (or drops the entry) when the value has the
//! wrong type or is out of range, so a single bad field never invalidates
//! the rest of a suggestion.

use crate::task::domain::{Priority, TaskId};
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde_json::Value;
use std::collections::HashSet;

/// Returns the first present value among several alternative keys.
#[must_use]
pub fn lookup<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| object.get(*key).filter(|value| !value.is_null()))
}

/// Reads one of the four priority levels.
#[must_use]
pub fn priority(value: &Value) -> Option<Priority> {
    value.as_str().and_then(|raw| Priority::try_from(raw).ok())
}

/// Reads a non-negative whole number of minutes from a number or a numeric
/// string.
#[must_use]
pub fn minutes(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|raw| u32::try_from(raw).ok()),
        Value::String(raw) => raw.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Reads a non-blank string, trimmed.
#[must_use]
pub fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_owned)
}

/// Reads an RFC 3339 timestamp or a calendar date (taken as midnight UTC).
#[must_use]
pub fn deadline(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            calendar_date(raw)
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(|midnight| midnight.and_utc())
        })
}

/// Reads a `YYYY-MM-DD` calendar date, ignoring any time suffix.
#[must_use]
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Reads a confidence score in `0.0..=1.0`.
#[must_use]
pub fn confidence(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|score| (0.0..=1.0).contains(score))
}

/// Reads a list of task identifiers, keeping only known identifiers and
/// the first occurrence of each.
#[must_use]
pub fn known_ids(value: &Value, known: &HashSet<&TaskId>) -> Vec<TaskId> {
    let mut ids: Vec<TaskId> = Vec::new();
    for raw in value.as_array().into_iter().flatten().filter_map(Value::as_str) {
        let id = TaskId::from(raw.trim());
        if known.contains(&id) && !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Reads a list of non-blank strings.
#[must_use]
pub fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(text)
        .collect()
}

/// Reads a weekday from its English name or from a number counted from
/// Sunday = 0.
#[must_use]
pub fn weekday(value: &Value) -> Option<Weekday> {
    match value {
        Value::String(raw) => raw.trim().parse::<Weekday>().ok(),
        Value::Number(number) => {
            let offset = number.as_u64().filter(|offset| *offset < 7)?;
            let mut day = Weekday::Sun;
            for _ in 0..offset {
                day = day.succ();
            }
            Some(day)
        }
        _ => None,
    }
}

/// Reads a small integer within `min..=max`.
#[must_use]
pub fn bounded_u8(value: &Value, min: u8, max: u8) -> Option<u8> {
    value
        .as_u64()
        .and_then(|raw| u8::try_from(raw).ok())
        .filter(|number| (min..=max).contains(number))
}
