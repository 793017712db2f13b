//! Port abstraction for habit CRUD adapters.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::habit::{Frequency, Habit, HabitId, HabitName};
use crate::domain::user::UserId;

/// Persistence errors raised by habit repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HabitPersistenceError {
    /// Repository connection could not be established.
    #[error("habit repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("habit repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl HabitPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Fields for creating a habit; the adapter assigns the identifier and a
/// zero streak.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: HabitName,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Advisory cadence.
    pub frequency: Frequency,
}

/// Partial update for a habit; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitChanges {
    /// Replacement name.
    pub name: Option<HabitName>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement cadence.
    pub frequency: Option<Frequency>,
}

/// Durable storage for habits, always scoped to the owning user.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// List the user's habits together with whether each was completed on
    /// `today`.
    async fn list_for_user(
        &self,
        user: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<(Habit, bool)>, HabitPersistenceError>;

    /// Create a habit and return the stored record.
    async fn create(&self, habit: NewHabit) -> Result<Habit, HabitPersistenceError>;

    /// Apply changes to the user's habit; `None` when it does not exist for
    /// that user.
    async fn update(
        &self,
        id: &HabitId,
        user: &UserId,
        changes: HabitChanges,
    ) -> Result<Option<Habit>, HabitPersistenceError>;

    /// Delete the user's habit and, by cascade, its logs.
    ///
    /// Returns `false` when no such habit exists for that user.
    async fn delete(&self, id: &HabitId, user: &UserId) -> Result<bool, HabitPersistenceError>;
}
