//! Shared mapping from Diesel/pool failures to adapter-facing categories.
//!
//! Every repository distinguishes only two failure classes: the connection
//! could not be obtained (retryable, surfaces as 503) and the query itself
//! failed (surfaces as 500). The mapping logs the real error and hands a
//! sanitised message upstream.

use tracing::debug;

use super::pool::PoolError;

/// Adapter-internal failure classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// Connection checkout or establishment failed.
    Connection(String),
    /// Query or mutation failed during execution.
    Query(String),
}

impl StoreFailure {
    pub(crate) fn from_pool(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }

    pub(crate) fn from_diesel(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            other => debug!(error = %other, "diesel operation failed"),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            _ => Self::Query("database error".to_owned()),
        }
    }

    /// Whether the error is a unique-constraint violation.
    pub(crate) fn is_unique_violation(error: &diesel::result::Error) -> bool {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};
        matches!(
            error,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
        )
    }
}
