//! Shared HTTP handler state.
//!
//! Handlers accept this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{HabitRepository, TrackingRepository, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User account storage.
    pub users: Arc<dyn UserRepository>,
    /// Habit CRUD storage.
    pub habits: Arc<dyn HabitRepository>,
    /// Completion-log storage and the atomic toggle.
    pub tracking: Arc<dyn TrackingRepository>,
}

impl HttpState {
    /// Bundle the port implementations handlers need.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        habits: Arc<dyn HabitRepository>,
        tracking: Arc<dyn TrackingRepository>,
    ) -> Self {
        Self {
            users,
            habits,
            tracking,
        }
    }
}
