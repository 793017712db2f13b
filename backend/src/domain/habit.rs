//! Habit and habit-log entities.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Maximum accepted length for a habit name.
const HABIT_NAME_MAX: usize = 100;

/// Validation errors raised by the habit value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Identifier was empty or not a UUID.
    InvalidId,
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeds [`HABIT_NAME_MAX`] characters.
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Frequency string was not one of `daily`, `weekly`, `monthly`.
    UnknownFrequency,
}

impl fmt::Display for HabitValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "habit id must be a valid UUID"),
            Self::EmptyName => write!(f, "name is required"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::UnknownFrequency => {
                write!(f, "frequency must be one of daily, weekly, monthly")
            }
        }
    }
}

impl std::error::Error for HabitValidationError {}

/// Stable habit identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct HabitId(Uuid);

impl HabitId {
    /// Parse an identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, HabitValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| HabitValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable habit-log identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(Uuid);

impl LogId {
    /// Wrap an already-parsed UUID.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

/// Required, trimmed, bounded habit name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitName(String);

impl HabitName {
    /// Validate and construct a name from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, HabitValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        if trimmed.chars().count() > HABIT_NAME_MAX {
            return Err(HabitValidationError::NameTooLong {
                max: HABIT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for HabitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Advisory cadence for a habit.
///
/// Streak arithmetic only understands the daily cadence; the other values are
/// display hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Tracked every day; the only cadence the streak engine counts.
    Daily,
    /// Weekly reminder cadence, advisory only.
    Weekly,
    /// Monthly reminder cadence, advisory only.
    Monthly,
}

impl Frequency {
    /// Canonical lowercase name, matching the stored column value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = HabitValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(HabitValidationError::UnknownFrequency),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-defined recurring activity to track.
///
/// ## Invariants
/// - `streak` is the denormalized consecutive-day count maintained by the
///   toggle engine; reads recompute the same value from log history.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    /// Stable identifier.
    pub id: HabitId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: HabitName,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Advisory cadence.
    pub frequency: Frequency,
    /// Denormalized current streak counter.
    pub streak: u32,
}

/// A record that a habit was completed on a specific calendar day.
///
/// ## Invariants
/// - At most one log exists per `(habit_id, day)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitLog {
    /// Stable identifier.
    pub id: LogId,
    /// Habit this completion belongs to.
    pub habit_id: HabitId,
    /// Calendar day of the completion (UTC day convention).
    pub day: NaiveDate,
    /// Optional reflection attached after completion.
    pub reflection: Option<String>,
}
