//! Port abstraction for the completion-tracking adapter: the toggle engine's
//! atomic storage operation plus the read queries behind stats and journal.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::habit::HabitId;
use crate::domain::journal::JournalLog;
use crate::domain::stats::HabitHistory;
use crate::domain::user::UserId;

/// Errors raised by tracking adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingError {
    /// Repository connection could not be established.
    #[error("tracking repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("tracking repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The habit does not exist for the acting user.
    #[error("habit not found")]
    HabitNotFound,
}

impl TrackingError {
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

/// Result of flipping a habit's completion state for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ToggleOutcome {
    /// Whether the habit is now completed for the day.
    pub completed: bool,
    /// The recomputed streak persisted alongside the flip.
    pub streak: u32,
}

/// Durable storage for completion logs.
///
/// Adapters must make [`TrackingRepository::toggle`] atomic: the check for
/// today's log, the delete/insert, the streak recompute, and the counter
/// update happen as one unit so concurrent toggles on the same habit cannot
/// interleave (lost update / double counting).
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    /// Flip the habit's completion state for `today` and persist the
    /// recomputed streak.
    async fn toggle(
        &self,
        habit: &HabitId,
        user: &UserId,
        today: NaiveDate,
    ) -> Result<ToggleOutcome, TrackingError>;

    /// Attach reflection text to the log for `day`, scoped to the owner.
    ///
    /// Returns `false` when the habit exists but has no log on that day;
    /// fails with [`TrackingError::HabitNotFound`] when the habit itself is
    /// missing for the user.
    async fn save_reflection(
        &self,
        habit: &HabitId,
        user: &UserId,
        day: NaiveDate,
        reflection: &str,
    ) -> Result<bool, TrackingError>;

    /// Every habit of the user with its full log history, days newest-first.
    async fn habit_histories(&self, user: &UserId) -> Result<Vec<HabitHistory>, TrackingError>;

    /// All of the user's logs within `[from, to]`, joined with habit names,
    /// ordered oldest first.
    async fn logs_in_range(
        &self,
        user: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<JournalLog>, TrackingError>;
}
