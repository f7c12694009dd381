//! "Due today or overdue" selection
//!
//! The cutoff is the end of the current UTC day; per-task time zones are
//! not consulted.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::types::Task;

/// `+0000` style offset at the end of a timestamp
static COMPACT_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([+-])(\d{2})(\d{2})$").expect("valid offset pattern")
});

/// Parse a provider due date such as `2024-01-15T10:00:00.000+0000`
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let normalized = COMPACT_OFFSET.replace(raw.trim(), "$1$2:$3");
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// 23:59:59.999999 UTC on the day of `now`
pub fn end_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .map_or(now, |last| last.and_utc())
}

/// Merge per-project task lists into the today view
///
/// First occurrence of a task id wins; completed tasks and tasks without a
/// parsable due date are dropped; the rest are kept when due by the end of
/// `now`'s UTC day and sorted by their raw due date string.
pub fn select_due<I>(batches: I, now: DateTime<Utc>) -> Vec<Task>
where
    I: IntoIterator<Item = Vec<Task>>,
{
    let cutoff = end_of_day(now);
    let mut seen = HashSet::new();

    let mut due: Vec<Task> = batches
        .into_iter()
        .flatten()
        .filter(|task| seen.insert(task.id.clone()))
        .filter(|task| !task.is_completed())
        .filter(|task| {
            task.due_date
                .as_deref()
                .and_then(parse_due_date)
                .is_some_and(|due| due <= cutoff)
        })
        .collect();

    due.sort_by(|a, b| {
        let a = a.due_date.as_deref().unwrap_or("");
        let b = b.due_date.as_deref().unwrap_or("");
        a.cmp(b)
    });
    due
}
