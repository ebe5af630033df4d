//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::CoreError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub schema_version: i64,
    pub version: &'static str,
}

/// `GET /api/health` — liveness plus a round-trip to the database.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let schema_version = crate::db::get_current_version(&conn).map_err(CoreError::from)?;

    Ok(Json(HealthResponse {
        status: "ok",
        schema_version,
        version: crate::config::APP_VERSION,
    }))
}
