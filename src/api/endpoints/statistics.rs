//! Dashboard statistics endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::scheduling::{self, AppointmentStatistics};

/// `GET /api/statistics` — recomputed from the store on every call.
pub async fn summary(State(ctx): State<ApiContext>) -> Result<Json<AppointmentStatistics>, ApiError> {
    let conn = ctx.core.open_db()?;
    let stats = scheduling::statistics_for(&conn, ctx.now())?;
    Ok(Json(stats))
}
