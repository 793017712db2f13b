//! Habit tracker backend library.
//!
//! Hexagonal layout: `domain` holds entities, the streak/stats/journal logic,
//! and the port traits; `inbound::http` exposes the REST surface;
//! `outbound::persistence` implements the ports over PostgreSQL; `server`
//! covers configuration and migrations.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Trace;
