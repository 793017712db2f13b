//! PostgreSQL-backed `HabitRepository` implementation using Diesel.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{HabitChanges, HabitPersistenceError, HabitRepository, NewHabit};
use crate::domain::{Habit, HabitId, UserId};

use super::diesel_error::StoreFailure;
use super::models::{HabitRow, HabitRowChanges, NewHabitRow};
use super::pool::DbPool;
use super::schema::{habit_logs, habits};

/// Diesel-backed implementation of the `HabitRepository` port.
#[derive(Clone)]
pub struct DieselHabitRepository {
    pool: DbPool,
}

impl DieselHabitRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure) -> HabitPersistenceError {
    match failure {
        StoreFailure::Connection(message) => HabitPersistenceError::connection(message),
        StoreFailure::Query(message) => HabitPersistenceError::query(message),
    }
}

fn row_to_habit(row: HabitRow) -> Result<Habit, HabitPersistenceError> {
    row.into_domain()
        .map_err(|message| HabitPersistenceError::query(format!("corrupt habit row: {message}")))
}

#[async_trait]
impl HabitRepository for DieselHabitRepository {
    async fn list_for_user(
        &self,
        user: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<(Habit, bool)>, HabitPersistenceError> {
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
        let completed_today: HashSet<Uuid> = habit_logs::table
            .filter(habit_logs::habit_id.eq_any(&ids))
            .filter(habit_logs::day.eq(today))
            .select(habit_logs::habit_id)
            .load::<Uuid>(&mut conn)
            .await
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?
            .into_iter()
            .collect();

        rows.into_iter()
            .map(|row| {
                let completed = completed_today.contains(&row.id);
                row_to_habit(row).map(|habit| (habit, completed))
            })
            .collect()
    }

    async fn create(&self, habit: NewHabit) -> Result<Habit, HabitPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let row = NewHabitRow {
            id: Uuid::new_v4(),
            user_id: habit.user_id.as_uuid(),
            name: habit.name.as_ref(),
            description: habit.description.as_deref(),
            frequency: habit.frequency.as_str(),
            streak: 0,
        };
        let stored: HabitRow = diesel::insert_into(habits::table)
            .values(&row)
            .get_result(&mut conn)
            .await
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
        row_to_habit(stored)
    }

    async fn update(
        &self,
        id: &HabitId,
        user: &UserId,
        changes: HabitChanges,
    ) -> Result<Option<Habit>, HabitPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let scope = habits::table
            .filter(habits::id.eq(id.as_uuid()))
            .filter(habits::user_id.eq(user.as_uuid()));

        // An all-None changeset would produce an empty UPDATE; fall back to a
        // plain read so the caller still gets the current record.
        if changes.name.is_none() && changes.description.is_none() && changes.frequency.is_none() {
            let row = scope
                .select(HabitRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
            return row.map(row_to_habit).transpose();
        }

        let row_changes = HabitRowChanges {
            name: changes.name.as_ref().map(AsRef::as_ref),
            description: changes.description.as_deref(),
            frequency: changes.frequency.map(|f| f.as_str()),
        };
        let updated: Option<HabitRow> = diesel::update(scope)
            .set(&row_changes)
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
        updated.map(row_to_habit).transpose()
    }

    async fn delete(&self, id: &HabitId, user: &UserId) -> Result<bool, HabitPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let deleted = diesel::delete(
            habits::table
                .filter(habits::id.eq(id.as_uuid()))
                .filter(habits::user_id.eq(user.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
        Ok(deleted > 0)
    }
}
