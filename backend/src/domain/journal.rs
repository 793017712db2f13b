//! Calendar-style journal view: a month of logs grouped by day.
//!
//! Pure read/transform. The output map is keyed by ISO day (`YYYY-MM-DD`)
//! and ordered, so serialised JSON lists days chronologically.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::habit::HabitId;

/// One completed habit inside a journal day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Habit identifier.
    pub id: HabitId,
    /// Habit display name at read time.
    pub habit_name: String,
    /// Always true: only completed days have logs.
    pub completed: bool,
    /// Reflection text, empty when none was written.
    pub reflection: String,
}

/// All completions for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JournalDay {
    /// ISO day (`YYYY-MM-DD`), repeated from the map key for clients.
    pub date: String,
    /// Completed habits on that day.
    pub habits: Vec<JournalEntry>,
}

/// A log row joined with its habit's name, as fetched for the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalLog {
    /// Habit the log belongs to.
    pub habit_id: HabitId,
    /// Habit display name.
    pub habit_name: String,
    /// Calendar day of the completion.
    pub day: NaiveDate,
    /// Optional reflection text.
    pub reflection: Option<String>,
}

/// Resolve a `(year, month)` pair to the first and last day of that month.
///
/// Returns `None` for out-of-range months or years `chrono` cannot represent.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}

/// Group a month's logs by ISO day for calendar display.
///
/// The at-most-one-log-per-(habit, day) invariant holds by construction in
/// the store, so the grouping never emits duplicates.
#[must_use]
pub fn group_by_day(logs: &[JournalLog]) -> BTreeMap<String, JournalDay> {
    let mut grouped: BTreeMap<String, JournalDay> = BTreeMap::new();
    for log in logs {
        let key = log.day.format("%Y-%m-%d").to_string();
        let day = grouped.entry(key.clone()).or_insert_with(|| JournalDay {
            date: key,
            habits: Vec::new(),
        });
        day.habits.push(JournalEntry {
            id: log.habit_id,
            habit_name: log.habit_name.clone(),
            completed: true,
            reflection: log.reflection.clone().unwrap_or_default(),
        });
    }
    grouped
}
