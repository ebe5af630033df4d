//! Month view endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::scheduling::{self, DayCell};

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// `YYYY-MM`; the current month when absent.
    pub month: Option<String>,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub month: String,
    pub days: Vec<DayCell>,
}

/// `GET /api/calendar?month=YYYY-MM`
pub async fn month(
    State(ctx): State<ApiContext>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let Query(query) = query?;
    let today = ctx.today();
    let anchor = match query.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        None => today,
        Some(raw) => parse_month(raw)?,
    };
    let conn = ctx.core.open_db()?;

    let days = scheduling::month_grid_for(&conn, anchor, today)?;
    Ok(Json(CalendarResponse {
        month: anchor.format("%Y-%m").to_string(),
        days,
    }))
}

fn parse_month(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid month {raw:?}, expected YYYY-MM")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parameter() {
        assert_eq!(parse_month("2024-06").unwrap(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("June").is_err());
        assert!(parse_month("2024-06-01").is_err());
    }
}
