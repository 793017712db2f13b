//! Domain ports: the persistence traits adapters implement.

mod habit_repository;
mod tracking_repository;
mod user_repository;

pub use habit_repository::{HabitChanges, HabitPersistenceError, HabitRepository, NewHabit};
pub use tracking_repository::{ToggleOutcome, TrackingError, TrackingRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
