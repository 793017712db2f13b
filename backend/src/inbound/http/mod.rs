//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod error;
pub mod habits;
pub mod health;
pub mod journal;
pub mod session;
pub mod state;
pub mod stats;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;
