//! Read-only statistics views over a user's habits and completion logs.
//!
//! All three views derive from the same input: each habit with its full log
//! history (days newest-first). The trailing window is fixed at 30 days
//! ending today, zero-filled so charts always have a stable x-axis.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::habit::Habit;
use super::streak;

/// Number of days in the trailing completion window, including today.
pub const WINDOW_DAYS: u64 = 30;

/// One habit together with its complete log history, days newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitHistory {
    /// The habit the days belong to.
    pub habit: Habit,
    /// Logged calendar days, strictly descending.
    pub days: Vec<NaiveDate>,
}

/// Completion count for a single day of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayCount {
    /// ISO day (`YYYY-MM-DD`).
    pub date: String,
    /// Number of habits completed on that day.
    pub count: u32,
}

/// Per-habit completion total within the window, shaped for a pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HabitSlice {
    /// Habit display name.
    pub name: String,
    /// Completions within the window.
    pub value: u32,
}

/// Current and best streak for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StreakSummary {
    /// Habit display name.
    pub habit: String,
    /// Consecutive run ending today; zero when today is unlogged.
    pub current: u32,
    /// Longest consecutive run anywhere in the history.
    pub best: u32,
}

/// Aggregate statistics payload for the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    /// Completions per day over the trailing window, oldest first.
    pub completion_data: Vec<DayCount>,
    /// Completions per habit within the window.
    pub pie_data: Vec<HabitSlice>,
    /// Current/best streak per habit.
    pub streaks: Vec<StreakSummary>,
}

fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(WINDOW_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

fn iso(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Build all three statistics views for the given day.
///
/// `histories` carries every habit of the user, including those with no logs
/// at all; such habits still appear with zero totals and zero streaks.
#[must_use]
pub fn build_stats(today: NaiveDate, histories: &[HabitHistory]) -> StatsView {
    let start = window_start(today);

    let mut completion_data: Vec<DayCount> = start
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|day| DayCount {
            date: iso(day),
            count: 0,
        })
        .collect();

    for history in histories {
        for day in &history.days {
            if *day < start || *day > today {
                continue;
            }
            let offset = (*day - start).num_days();
            if let Ok(index) = usize::try_from(offset) {
                if let Some(entry) = completion_data.get_mut(index) {
                    entry.count += 1;
                }
            }
        }
    }

    let pie_data = histories
        .iter()
        .map(|history| HabitSlice {
            name: history.habit.name.as_ref().to_owned(),
            value: u32::try_from(
                history
                    .days
                    .iter()
                    .filter(|day| **day >= start && **day <= today)
                    .count(),
            )
            .unwrap_or(u32::MAX),
        })
        .collect();

    let streaks = histories
        .iter()
        .map(|history| StreakSummary {
            habit: history.habit.name.as_ref().to_owned(),
            current: streak::consecutive_run_ending(today, &history.days),
            best: streak::best_streak(&history.days),
        })
        .collect();

    StatsView {
        completion_data,
        pie_data,
        streaks,
    }
}
