//! Habit CRUD, the daily toggle, and reflection handlers.
//!
//! ```text
//! GET    /api/habits
//! POST   /api/habits                {"name":"Read","description":null,"frequency":"daily"}
//! PATCH  /api/habits/{id}
//! DELETE /api/habits/{id}
//! POST   /api/habits/{id}/toggle
//! POST   /api/habits/{id}/reflection {"reflection":"felt good"}
//! ```
//!
//! "Today" is the UTC calendar day, computed once per request and passed
//! down so the check and the write agree on the day boundary.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{
    HabitChanges, HabitPersistenceError, NewHabit, ToggleOutcome, TrackingError,
};
use crate::domain::{Error, Frequency, Habit, HabitId, HabitName, HabitValidationError};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub(crate) fn map_habit_persistence_error(error: HabitPersistenceError) -> Error {
    match error {
        HabitPersistenceError::Connection { message } => Error::service_unavailable(message),
        HabitPersistenceError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_tracking_error(error: TrackingError) -> Error {
    match error {
        TrackingError::Connection { message } => Error::service_unavailable(message),
        TrackingError::Query { message } => Error::internal(message),
        TrackingError::HabitNotFound => Error::not_found("Habit not found"),
    }
}

fn map_habit_validation_error(error: HabitValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

fn parse_habit_id(raw: &str) -> Result<HabitId, Error> {
    HabitId::new(raw).map_err(map_habit_validation_error)
}

fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Habit as presented to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitDto {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Advisory cadence.
    pub frequency: Frequency,
    /// Current consecutive-day streak.
    pub streak: u32,
    /// Whether the habit is completed today; omitted where the endpoint does
    /// not compute it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_today: Option<bool>,
}

impl HabitDto {
    fn from_habit(habit: &Habit, completed_today: Option<bool>) -> Self {
        Self {
            id: habit.id.to_string(),
            name: habit.name.as_ref().to_owned(),
            description: habit.description.clone(),
            frequency: habit.frequency,
            streak: habit.streak,
            completed_today,
        }
    }
}

/// Body for creating a habit.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateHabitRequest {
    /// Display name, required.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Cadence; defaults to daily.
    #[serde(default)]
    pub frequency: Option<Frequency>,
}

/// Body for updating a habit; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateHabitRequest {
    /// Replacement name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement cadence.
    #[serde(default)]
    pub frequency: Option<Frequency>,
}

/// Body for attaching a reflection to today's log.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReflectionRequest {
    /// Free-text reflection.
    pub reflection: String,
}

/// List the user's habits with today's completion state.
#[utoipa::path(
    get,
    path = "/api/habits",
    responses(
        (status = 200, description = "The user's habits", body = [HabitDto]),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["habits"]
)]
#[get("/habits")]
pub async fn list_habits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<HabitDto>>> {
    let user_id = session.require_user_id()?;
    let habits = state
        .habits
        .list_for_user(&user_id, today_utc())
        .await
        .map_err(map_habit_persistence_error)?;
    let dtos = habits
        .iter()
        .map(|(habit, completed)| HabitDto::from_habit(habit, Some(*completed)))
        .collect();
    Ok(web::Json(dtos))
}

/// Create a habit; streak starts at zero.
#[utoipa::path(
    post,
    path = "/api/habits",
    request_body = CreateHabitRequest,
    responses(
        (status = 200, description = "Created habit", body = HabitDto),
        (status = 400, description = "Name is required"),
        (status = 401, description = "Not logged in")
    ),
    tags = ["habits"]
)]
#[post("/habits")]
pub async fn create_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateHabitRequest>,
) -> ApiResult<web::Json<HabitDto>> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let name = HabitName::new(&payload.name).map_err(map_habit_validation_error)?;
    let habit = state
        .habits
        .create(NewHabit {
            user_id,
            name,
            description: payload.description,
            frequency: payload.frequency.unwrap_or(Frequency::Daily),
        })
        .await
        .map_err(map_habit_persistence_error)?;
    Ok(web::Json(HabitDto::from_habit(&habit, Some(false))))
}

/// Update name, description, or frequency of the user's habit.
#[utoipa::path(
    patch,
    path = "/api/habits/{id}",
    request_body = UpdateHabitRequest,
    params(("id" = String, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Updated habit", body = HabitDto),
        (status = 404, description = "No such habit for this user")
    ),
    tags = ["habits"]
)]
#[patch("/habits/{id}")]
pub async fn update_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateHabitRequest>,
) -> ApiResult<web::Json<HabitDto>> {
    let user_id = session.require_user_id()?;
    let habit_id = parse_habit_id(&path)?;
    let payload = payload.into_inner();
    let name = payload
        .name
        .map(|raw| HabitName::new(&raw).map_err(map_habit_validation_error))
        .transpose()?;
    let changes = HabitChanges {
        name,
        description: payload.description,
        frequency: payload.frequency,
    };
    let habit = state
        .habits
        .update(&habit_id, &user_id, changes)
        .await
        .map_err(map_habit_persistence_error)?
        .ok_or_else(|| Error::not_found("Habit not found"))?;
    Ok(web::Json(HabitDto::from_habit(&habit, None)))
}

/// Delete the user's habit and its logs.
#[utoipa::path(
    delete,
    path = "/api/habits/{id}",
    params(("id" = String, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Habit deleted"),
        (status = 404, description = "No such habit for this user")
    ),
    tags = ["habits"]
)]
#[delete("/habits/{id}")]
pub async fn delete_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let habit_id = parse_habit_id(&path)?;
    let deleted = state
        .habits
        .delete(&habit_id, &user_id)
        .await
        .map_err(map_habit_persistence_error)?;
    if !deleted {
        return Err(Error::not_found("Habit not found").into());
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Flip today's completion state and return the recomputed streak.
#[utoipa::path(
    post,
    path = "/api/habits/{id}/toggle",
    params(("id" = String, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "New completion state", body = ToggleOutcome),
        (status = 404, description = "No such habit for this user"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["habits"]
)]
#[post("/habits/{id}/toggle")]
pub async fn toggle_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ToggleOutcome>> {
    let user_id = session.require_user_id()?;
    let habit_id = parse_habit_id(&path)?;
    let outcome = state
        .tracking
        .toggle(&habit_id, &user_id, today_utc())
        .await
        .map_err(map_tracking_error)?;
    Ok(web::Json(outcome))
}

/// Attach a reflection to today's log.
#[utoipa::path(
    post,
    path = "/api/habits/{id}/reflection",
    request_body = ReflectionRequest,
    params(("id" = String, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Reflection saved"),
        (status = 404, description = "No log for today, or no such habit")
    ),
    tags = ["habits"]
)]
#[post("/habits/{id}/reflection")]
pub async fn save_reflection(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReflectionRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let habit_id = parse_habit_id(&path)?;
    let saved = state
        .tracking
        .save_reflection(&habit_id, &user_id, today_utc(), &payload.reflection)
        .await
        .map_err(map_tracking_error)?;
    if !saved {
        return Err(Error::not_found("No log found for today").into());
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
