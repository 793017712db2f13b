//! Consecutive-day streak arithmetic.
//!
//! This is the single recompute path shared by the toggle engine and the
//! stats aggregator: both measure runs with [`consecutive_run_ending`], so
//! the denormalized `habits.streak` column and the read-time value can only
//! differ if rows changed between requests, never by algorithm.
//!
//! Inputs are calendar days sorted newest-first with at most one entry per
//! day (the store enforces the uniqueness invariant).

use std::cmp::Ordering;

use chrono::NaiveDate;

/// Count the consecutive run of logged days ending exactly at `anchor`.
///
/// Walks `days_desc` newest-first expecting `anchor`, `anchor - 1 day`, and
/// so on; stops at the first gap. Days after `anchor` are skipped so a
/// partial history slice and a full one agree. Returns `0` when `anchor`
/// itself is unlogged.
#[must_use]
pub fn consecutive_run_ending(anchor: NaiveDate, days_desc: &[NaiveDate]) -> u32 {
    let mut expected = anchor;
    let mut run = 0;
    for day in days_desc {
        match day.cmp(&expected) {
            Ordering::Greater => continue,
            Ordering::Equal => {
                run += 1;
                let Some(prev) = expected.pred_opt() else {
                    break;
                };
                expected = prev;
            }
            Ordering::Less => break,
        }
    }
    run
}

/// Length of the longest consecutive-day run anywhere in the history.
///
/// Single pass over `days_desc`: a day exactly one before its predecessor
/// extends the running count, anything else restarts it.
#[must_use]
pub fn best_streak(days_desc: &[NaiveDate]) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut last: Option<NaiveDate> = None;
    for day in days_desc {
        run = match last {
            Some(prev) if prev.pred_opt() == Some(*day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        last = Some(*day);
    }
    best
}
