//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the
//! request/response schemas, and the session cookie security scheme. The
//! generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::error::ErrorCode;
use crate::domain::journal::{JournalDay, JournalEntry};
use crate::domain::ports::ToggleOutcome;
use crate::domain::stats::{DayCount, HabitSlice, StatsView, StreakSummary};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest, RegisterResponse, UserDto};
use crate::inbound::http::habits::{
    CreateHabitRequest, HabitDto, ReflectionRequest, UpdateHabitRequest,
};
use crate::inbound::http::users::ProfileResponse;
use crate::inbound::http::ApiError;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Habit tracker backend API",
        description = "HTTP interface for habit CRUD, daily completion tracking, \
                       streaks, statistics, and the monthly journal."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::habits::list_habits,
        crate::inbound::http::habits::create_habit,
        crate::inbound::http::habits::update_habit,
        crate::inbound::http::habits::delete_habit,
        crate::inbound::http::habits::toggle_habit,
        crate::inbound::http::habits::save_reflection,
        crate::inbound::http::stats::stats,
        crate::inbound::http::journal::journal,
        crate::inbound::http::users::profile,
        crate::inbound::http::users::complete_onboarding,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        RegisterResponse,
        UserDto,
        HabitDto,
        CreateHabitRequest,
        UpdateHabitRequest,
        ReflectionRequest,
        ToggleOutcome,
        StatsView,
        DayCount,
        HabitSlice,
        StreakSummary,
        JournalDay,
        JournalEntry,
        ProfileResponse,
    ))
)]
pub struct ApiDoc;
