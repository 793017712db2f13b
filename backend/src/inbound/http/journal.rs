//! Monthly journal endpoint.
//!
//! ```text
//! GET /api/journal?year=2025&month=8
//! ```

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::journal::{group_by_day, month_bounds, JournalDay};
use crate::domain::Error;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::habits::map_tracking_error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query parameters selecting the journal month.
#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Calendar month, 1-12.
    pub month: Option<u32>,
}

/// The user's logs for one month, grouped by ISO day.
#[utoipa::path(
    get,
    path = "/api/journal",
    params(
        ("year" = i32, Query, description = "Calendar year"),
        ("month" = u32, Query, description = "Calendar month, 1-12")
    ),
    responses(
        (status = 200, description = "Logs grouped by day"),
        (status = 400, description = "Missing or invalid year/month"),
        (status = 401, description = "Not logged in")
    ),
    tags = ["journal"]
)]
#[get("/journal")]
pub async fn journal(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<JournalQuery>,
) -> ApiResult<web::Json<BTreeMap<String, JournalDay>>> {
    let user_id = session.require_user_id()?;
    let (Some(year), Some(month)) = (query.year, query.month) else {
        return Err(Error::invalid_request("year and month are required").into());
    };
    let (from, to) = month_bounds(year, month)
        .ok_or_else(|| Error::invalid_request("year and month must name a valid month"))?;
    let logs = state
        .tracking
        .logs_in_range(&user_id, from, to)
        .await
        .map_err(map_tracking_error)?;
    Ok(web::Json(group_by_day(&logs)))
}
