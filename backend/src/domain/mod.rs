//! Transport-agnostic domain: entities, value types, the streak engine, and
//! the ports adapters implement.

pub mod auth;
pub mod error;
pub mod habit;
pub mod journal;
pub mod ports;
pub mod stats;
pub mod streak;
pub mod user;

pub use auth::{AuthValidationError, LoginCredentials, Password, RegisterDetails};
pub use error::{Error, ErrorCode};
pub use habit::{Frequency, Habit, HabitId, HabitLog, HabitName, HabitValidationError, LogId};
pub use user::{EmailAddress, User, UserId, UserName, UserValidationError};
