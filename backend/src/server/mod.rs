//! Server bootstrap: configuration and schema migrations.

mod config;

pub use config::{AppConfig, ConfigError};

use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

/// Embedded migrations from the `migrations/` directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations over a short-lived synchronous connection.
///
/// Runs once at startup, before the async pool is built.
///
/// # Errors
///
/// Returns a description of the connection or migration failure.
pub fn run_migrations(database_url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|e| format!("failed to connect for migrations: {e}"))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| format!("failed to run migrations: {e}"))?;
    for migration in &applied {
        info!(migration = %migration, "applied migration");
    }
    Ok(())
}
