//! Aggregate statistics endpoint.
//!
//! ```text
//! GET /api/stats
//! ```
//!
//! The handler only fetches; all arithmetic lives in [`crate::domain::stats`]
//! so the streak numbers here and the ones the toggle engine persists come
//! from the same code path.

use actix_web::{get, web};
use chrono::Utc;

use crate::domain::stats::{build_stats, StatsView};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::habits::map_tracking_error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Completion chart, per-habit totals, and streaks for the user.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Aggregate statistics", body = StatsView),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["stats"]
)]
#[get("/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StatsView>> {
    let user_id = session.require_user_id()?;
    let histories = state
        .tracking
        .habit_histories(&user_id)
        .await
        .map_err(map_tracking_error)?;
    Ok(web::Json(build_stats(Utc::now().date_naive(), &histories)))
}
