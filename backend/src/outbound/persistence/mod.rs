//! PostgreSQL persistence adapters built on Diesel.
//!
//! Implements the domain ports against the schema in `migrations/`. Row
//! structs and error mapping are internal; the repositories and the pool are
//! the public surface.

mod diesel_error;
mod diesel_habit_repository;
mod diesel_tracking_repository;
mod diesel_user_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_habit_repository::DieselHabitRepository;
pub use diesel_tracking_repository::DieselTrackingRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
