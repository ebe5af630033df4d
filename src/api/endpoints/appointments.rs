//! Appointment endpoints.
//!
//! - `GET /api/slots` — daily slot catalog
//! - `GET /api/specialties` — bookable specialties and appointment statuses
//! - `GET /api/appointments/available?date=` — free slots on a day
//! - `GET /api/appointments/slots?date=` — every slot on a day, tagged
//! - `GET /api/appointments?status=&search=` — staff list
//! - `GET /api/appointments/upcoming` — non-canceled, from today on
//! - `POST /api/appointments` — book
//! - `GET /api/appointments/:id`
//! - `PATCH /api/appointments/:id/status` — confirm / cancel

use std::str::FromStr;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::appointment;
use crate::models::enums::{AppointmentStatus, Specialty};
use crate::models::{Appointment, SlotTime};
use crate::scheduling::{self, BookingRequest, SchedulingError, SlotAvailability};

// ─── Query & body types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CatalogResponse {
    pub slots: &'static [SlotTime],
}

#[derive(Serialize)]
pub struct EnumerationsResponse {
    pub specialties: &'static [Specialty],
    pub statuses: &'static [AppointmentStatus],
}

#[derive(Serialize)]
pub struct AvailableResponse {
    pub date: NaiveDate,
    pub slots: Vec<SlotTime>,
}

#[derive(Serialize)]
pub struct SlotBoardResponse {
    pub date: NaiveDate,
    pub slots: Vec<SlotAvailability>,
}

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

#[derive(Serialize)]
pub struct AppointmentResponse {
    pub appointment: Appointment,
    /// Statuses this appointment can still be moved to.
    pub next_statuses: Vec<AppointmentStatus>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        let next_statuses = scheduling::next_statuses(appointment.status);
        Self {
            appointment,
            next_statuses,
        }
    }
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /api/slots`
pub async fn catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        slots: scheduling::catalog_slots(),
    })
}

/// `GET /api/specialties`
pub async fn enumerations() -> Json<EnumerationsResponse> {
    Json(EnumerationsResponse {
        specialties: Specialty::ALL,
        statuses: AppointmentStatus::ALL,
    })
}

/// `GET /api/appointments/available?date=YYYY-MM-DD`
pub async fn available(
    State(ctx): State<ApiContext>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<AvailableResponse>, ApiError> {
    let Query(query) = query?;
    let date = parse_date(query.date.as_deref())?;
    let conn = ctx.core.open_db()?;

    let slots = scheduling::available_slots_for(&conn, date, ctx.today())?;
    Ok(Json(AvailableResponse { date, slots }))
}

/// `GET /api/appointments/slots?date=YYYY-MM-DD`
pub async fn slot_board(
    State(ctx): State<ApiContext>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<SlotBoardResponse>, ApiError> {
    let Query(query) = query?;
    let date = parse_date(query.date.as_deref())?;
    let conn = ctx.core.open_db()?;

    let slots = scheduling::slot_board_for(&conn, date, ctx.today())?;
    Ok(Json(SlotBoardResponse { date, slots }))
}

/// `GET /api/appointments?status=&search=`
pub async fn list(
    State(ctx): State<ApiContext>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    let Query(query) = query?;
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            AppointmentStatus::from_str(raw)
                .map_err(|_| ApiError::BadRequest(format!("Unknown status {raw:?}")))?,
        ),
    };
    let conn = ctx.core.open_db()?;

    let appointments = appointment::list_appointments(&conn, status, query.search.as_deref())?;
    Ok(Json(AppointmentsResponse { appointments }))
}

/// `GET /api/appointments/upcoming`
pub async fn upcoming(State(ctx): State<ApiContext>) -> Result<Json<AppointmentsResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let appointments = appointment::upcoming_appointments(&conn, ctx.today())?;
    Ok(Json(AppointmentsResponse { appointments }))
}

/// `POST /api/appointments` — 201 with the stored appointment.
pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentResponse>), ApiError> {
    let Json(request) = body?;
    let conn = ctx.core.open_db()?;

    let created = scheduling::create_appointment(&conn, &request, ctx.now())?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /api/appointments/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.core.open_db()?;

    let found = appointment::find_appointment(&conn, &id)?;
    Ok(Json(found.into()))
}

/// `PATCH /api/appointments/:id/status` — body `{ "status": "confirmed" }`.
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    body: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(change) = body?;
    let to = AppointmentStatus::from_str(change.status.trim()).map_err(|_| {
        SchedulingError::Validation {
            field: "status",
            reason: format!("unknown status {:?}", change.status),
        }
    })?;
    let conn = ctx.core.open_db()?;

    let updated = scheduling::update_status(&conn, &id, to)?;
    Ok(Json(updated.into()))
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Query parameter `date` is required".into()))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date {raw:?}, expected YYYY-MM-DD")))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid appointment id".into()))
}
