//! PostgreSQL-backed `TrackingRepository` implementation using Diesel.
//!
//! The toggle runs inside a single transaction with the habit row locked
//! `FOR UPDATE`, so concurrent toggles on the same habit serialise and the
//! stored streak always reflects the logs it was computed from.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::journal::JournalLog;
use crate::domain::ports::{ToggleOutcome, TrackingError, TrackingRepository};
use crate::domain::stats::HabitHistory;
use crate::domain::streak;
use crate::domain::{HabitId, UserId};

use super::diesel_error::StoreFailure;
use super::models::{HabitRow, NewHabitLogRow};
use super::pool::DbPool;
use super::schema::{habit_logs, habits};

/// Diesel-backed implementation of the `TrackingRepository` port.
#[derive(Clone)]
pub struct DieselTrackingRepository {
    pool: DbPool,
}

impl DieselTrackingRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure) -> TrackingError {
    match failure {
        StoreFailure::Connection(message) => TrackingError::connection(message),
        StoreFailure::Query(message) => TrackingError::query(message),
    }
}

/// Transaction-internal error; lets ownership failures abort the toggle
/// without being conflated with database errors.
#[derive(Debug)]
enum ToggleTxError {
    HabitNotFound,
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for ToggleTxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Db(error)
    }
}

#[async_trait]
impl TrackingRepository for DieselTrackingRepository {
    async fn toggle(
        &self,
        habit: &HabitId,
        user: &UserId,
        today: NaiveDate,
    ) -> Result<ToggleOutcome, TrackingError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let habit_uuid = habit.as_uuid();
        let user_uuid = user.as_uuid();

        let outcome = conn
            .transaction::<ToggleOutcome, ToggleTxError, _>(|conn| {
                async move {
                    // Lock the habit row so a concurrent toggle on the same
                    // habit waits here rather than interleaving.
                    let locked: Option<Uuid> = habits::table
                        .filter(habits::id.eq(habit_uuid))
                        .filter(habits::user_id.eq(user_uuid))
                        .for_update()
                        .select(habits::id)
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Err(ToggleTxError::HabitNotFound);
                    }

                    let existing: Option<Uuid> = habit_logs::table
                        .filter(habit_logs::habit_id.eq(habit_uuid))
                        .filter(habit_logs::day.eq(today))
                        .select(habit_logs::id)
                        .first(conn)
                        .await
                        .optional()?;

                    let prior_days: Vec<NaiveDate> = habit_logs::table
                        .filter(habit_logs::habit_id.eq(habit_uuid))
                        .filter(habit_logs::day.lt(today))
                        .order(habit_logs::day.desc())
                        .select(habit_logs::day)
                        .load(conn)
                        .await?;
                    let yesterday = today.pred_opt().unwrap_or(NaiveDate::MIN);
                    let run_to_yesterday = streak::consecutive_run_ending(yesterday, &prior_days);

                    let outcome = match existing {
                        Some(log_id) => {
                            diesel::delete(habit_logs::table.find(log_id))
                                .execute(conn)
                                .await?;
                            ToggleOutcome {
                                completed: false,
                                streak: run_to_yesterday,
                            }
                        }
                        None => {
                            let row = NewHabitLogRow {
                                id: Uuid::new_v4(),
                                habit_id: habit_uuid,
                                day: today,
                            };
                            diesel::insert_into(habit_logs::table)
                                .values(&row)
                                .execute(conn)
                                .await?;
                            ToggleOutcome {
                                completed: true,
                                streak: run_to_yesterday + 1,
                            }
                        }
                    };

                    diesel::update(habits::table.find(habit_uuid))
                        .set(habits::streak.eq(i32::try_from(outcome.streak).unwrap_or(i32::MAX)))
                        .execute(conn)
                        .await?;

                    Ok(outcome)
                }
                .scope_boxed()
            })
            .await
            .map_err(|error| match error {
                ToggleTxError::HabitNotFound => TrackingError::HabitNotFound,
                ToggleTxError::Db(db) => to_port_error(StoreFailure::from_diesel(db)),
            })?;

        Ok(outcome)
    }

    async fn save_reflection(
        &self,
        habit: &HabitId,
        user: &UserId,
        day: NaiveDate,
        reflection: &str,
    ) -> Result<bool, TrackingError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let owned: Option<Uuid> = habits::table
            .filter(habits::id.eq(habit.as_uuid()))
            .filter(habits::user_id.eq(user.as_uuid()))
            .select(habits::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
        if owned.is_none() {
            return Err(TrackingError::HabitNotFound);
        }

        let updated = diesel::update(
            habit_logs::table
                .filter(habit_logs::habit_id.eq(habit.as_uuid()))
                .filter(habit_logs::day.eq(day)),
        )
        .set(habit_logs::reflection.eq(reflection))
        .execute(&mut conn)
        .await
        .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
        Ok(updated > 0)
    }

    async fn habit_histories(&self, user: &UserId) -> Result<Vec<HabitHistory>, TrackingError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let rows: Vec<HabitRow> = habits::table
            .filter(habits::user_id.eq(user.as_uuid()))
            .order(habits::created_at.asc())
            .select(HabitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let logged: Vec<(Uuid, NaiveDate)> = habit_logs::table
            .filter(habit_logs::habit_id.eq_any(&ids))
            .order(habit_logs::day.desc())
            .select((habit_logs::habit_id, habit_logs::day))
            .load(&mut conn)
            .await
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;

        // The rows arrive day-descending overall, so each habit's
        // subsequence is day-descending too.
        let mut days_by_habit: HashMap<Uuid, Vec<NaiveDate>> = HashMap::new();
        for (habit_id, day) in logged {
            days_by_habit.entry(habit_id).or_default().push(day);
        }

        rows.into_iter()
            .map(|row| {
                let days = days_by_habit.remove(&row.id).unwrap_or_default();
                let habit = row.into_domain().map_err(|message| {
                    TrackingError::query(format!("corrupt habit row: {message}"))
                })?;
                Ok(HabitHistory { habit, days })
            })
            .collect()
    }

    async fn logs_in_range(
        &self,
        user: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalLog>, TrackingError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let rows: Vec<(Uuid, String, NaiveDate, Option<String>)> = habit_logs::table
            .inner_join(habits::table)
            .filter(habits::user_id.eq(user.as_uuid()))
            .filter(habit_logs::day.between(from, to))
            .order(habit_logs::day.asc())
            .select((
                habits::id,
                habits::name,
                habit_logs::day,
                habit_logs::reflection,
            ))
            .load(&mut conn)
            .await
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;

        Ok(rows
            .into_iter()
            .map(|(habit_id, habit_name, day, reflection)| JournalLog {
                habit_id: HabitId::from_uuid(habit_id),
                habit_name,
                day,
                reflection,
            })
            .collect())
    }
}
