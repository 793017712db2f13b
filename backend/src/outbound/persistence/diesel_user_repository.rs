//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

use super::diesel_error::StoreFailure;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure) -> UserPersistenceError {
    match failure {
        StoreFailure::Connection(message) => UserPersistenceError::connection(message),
        StoreFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row.into_domain()
        .map_err(|message| UserPersistenceError::query(format!("corrupt user row: {message}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let row = NewUserRow {
            id: user.id.as_uuid(),
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            password_hash: &user.password_hash,
            image: user.image.as_deref(),
            has_completed_onboarding: user.has_completed_onboarding,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|error| {
                if StoreFailure::is_unique_violation(&error) {
                    UserPersistenceError::DuplicateEmail
                } else {
                    to_port_error(StoreFailure::from_diesel(error))
                }
            })?;
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
        row.map(row_to_user).transpose()
    }

    async fn mark_onboarded(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| to_port_error(StoreFailure::from_pool(e)))?;
        let updated = diesel::update(users::table.find(id.as_uuid()))
            .set(users::has_completed_onboarding.eq(true))
            .execute(&mut conn)
            .await
            .map_err(|e| to_port_error(StoreFailure::from_diesel(e)))?;
        Ok(updated > 0)
    }
}
