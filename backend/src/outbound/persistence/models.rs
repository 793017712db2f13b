//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions to domain types live here so every repository maps
//! rows the same way.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    EmailAddress, Frequency, Habit, HabitId, HabitName, User, UserId, UserName,
};

use super::schema::{habit_logs, habits, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image: Option<String>,
    pub has_completed_onboarding: bool,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert to the domain entity.
    ///
    /// Stored rows were validated on the way in; a row that no longer parses
    /// indicates out-of-band edits and surfaces as a query error upstream.
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let name = UserName::new(&self.name).map_err(|e| e.to_string())?;
        let email = EmailAddress::new(&self.email).map_err(|e| e.to_string())?;
        Ok(User {
            id: UserId::from_uuid(self.id),
            name,
            email,
            password_hash: self.password_hash,
            image: self.image,
            has_completed_onboarding: self.has_completed_onboarding,
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub image: Option<&'a str>,
    pub has_completed_onboarding: bool,
}

/// Row struct for reading from the habits table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HabitRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub frequency: String,
    pub streak: i32,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub created_at: DateTime<Utc>,
}

impl HabitRow {
    /// Convert to the domain entity; see [`UserRow::into_domain`] on
    /// validation of stored rows.
    pub(crate) fn into_domain(self) -> Result<Habit, String> {
        let name = HabitName::new(&self.name).map_err(|e| e.to_string())?;
        let frequency: Frequency = self.frequency.parse().map_err(
            |e: crate::domain::HabitValidationError| e.to_string(),
        )?;
        Ok(Habit {
            id: HabitId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            name,
            description: self.description,
            frequency,
            streak: u32::try_from(self.streak).unwrap_or(0),
        })
    }
}

/// Insertable struct for creating new habit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habits)]
pub(crate) struct NewHabitRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub frequency: &'a str,
    pub streak: i32,
}

/// Changeset for the partial habit update; `None` fields are skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = habits)]
pub(crate) struct HabitRowChanges<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub frequency: Option<&'a str>,
}

/// Insertable struct for creating new habit-log records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habit_logs)]
pub(crate) struct NewHabitLogRow {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub day: NaiveDate,
}
