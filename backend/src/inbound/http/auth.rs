//! Registration, login, and logout handlers, plus the argon2id password
//! helpers they share.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"ada@example.com","password":"..."}
//! POST /api/auth/login    {"email":"ada@example.com","password":"..."}
//! POST /api/auth/logout
//! ```

use actix_web::{post, web, HttpResponse};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{
    AuthValidationError, Error, LoginCredentials, Password, RegisterDetails, User,
};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Hash a password with argon2id using a fresh random salt.
pub(crate) fn hash_password(password: &Password) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| Error::internal(format!("password hashing failed: {error}")))
}

/// Verify a password against a stored PHC hash string.
///
/// An unparsable stored hash verifies as false rather than erroring; the
/// caller cannot do anything useful with the distinction.
pub(crate) fn verify_password(password: &Password, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok()
    })
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => Error::invalid_request("User already exists"),
    }
}

fn map_auth_validation_error(error: AuthValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Login email; must be unused.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Public view of a user, never carrying the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Optional profile image URL.
    pub image: Option<String>,
    /// Whether the onboarding flow has been completed.
    pub has_completed_onboarding: bool,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_ref().to_owned(),
            email: user.email.as_ref().to_owned(),
            image: user.image.clone(),
            has_completed_onboarding: user.has_completed_onboarding,
        }
    }
}

/// Registration response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// The newly created user.
    pub user: UserDto,
}

/// Create an account, establish a session, and return the new user.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid payload or email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"]
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<RegisterResponse>> {
    let payload = payload.into_inner();
    let details = RegisterDetails::try_from_parts(&payload.name, &payload.email, &payload.password)
        .map_err(map_auth_validation_error)?;

    let password_hash = hash_password(details.password())?;
    let user = User::register(details.name().clone(), details.email().clone(), password_hash);

    state
        .users
        .create(&user)
        .await
        .map_err(map_user_persistence_error)?;

    session.persist_user(&user.id)?;
    info!(user_id = %user.id, "user registered");
    Ok(web::Json(RegisterResponse {
        user: UserDto::from(&user),
    }))
}

/// Authenticate and establish a session.
///
/// Unknown email and wrong password are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"]
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_auth_validation_error)?;

    let user = state
        .users
        .find_by_email(credentials.email())
        .await
        .map_err(map_user_persistence_error)?
        .ok_or_else(|| Error::unauthorized("Invalid credentials"))?;

    if !verify_password(credentials.password(), &user.password_hash) {
        return Err(Error::unauthorized("Invalid credentials").into());
    }

    session.persist_user(&user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(HttpResponse::Ok().json(json!({ "success": true, "redirectTo": "/dashboard" })))
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["auth"]
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear();
    Ok(HttpResponse::Ok().json(json!({ "success": true, "redirectTo": "/login" })))
}
