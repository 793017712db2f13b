//! Profile and onboarding handlers for the session user.
//!
//! ```text
//! GET  /api/user/profile
//! POST /api/user/onboarding
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::UserPersistenceError;
use crate::domain::Error;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        // Reads never insert; a duplicate here means the adapter misbehaved.
        UserPersistenceError::DuplicateEmail => Error::internal("unexpected duplicate email"),
    }
}

/// Profile payload: just the display name, as the header bar needs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    /// Display name.
    pub name: String,
}

/// Display name of the session user.
#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "User record no longer exists")
    ),
    tags = ["user"]
)]
#[get("/user/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let user = state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(map_user_persistence_error)?
        .ok_or_else(|| Error::not_found("User not found"))?;
    Ok(web::Json(ProfileResponse {
        name: user.name.as_ref().to_owned(),
    }))
}

/// Record that the session user finished the first-run onboarding flow.
#[utoipa::path(
    post,
    path = "/api/user/onboarding",
    responses(
        (status = 200, description = "Onboarding recorded"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "User record no longer exists")
    ),
    tags = ["user"]
)]
#[post("/user/onboarding")]
pub async fn complete_onboarding(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let updated = state
        .users
        .mark_onboarded(&user_id)
        .await
        .map_err(map_user_persistence_error)?;
    if !updated {
        return Err(Error::not_found("User not found").into());
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
