use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::SchedulingError;
use crate::db::AppointmentStore;
use crate::models::enums::{AppointmentStatus, DayStatus};
use crate::models::{Appointment, AppointmentFilter};

/// Six full Sunday-to-Saturday weeks.
pub const GRID_CELLS: usize = 42;

/// One day of the month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub status: DayStatus,
    /// Non-canceled appointments on this day.
    pub appointment_count: usize,
}

/// First day shown in the grid for the month containing `anchor`.
pub fn grid_start(anchor: NaiveDate) -> NaiveDate {
    let first = anchor - Days::new(u64::from(anchor.day0()));
    first - Days::new(u64::from(first.weekday().num_days_from_sunday()))
}

/// Builds the 42-cell grid for the month containing `anchor`.
///
/// Starts on the Sunday on or before the 1st; trailing cells spill into
/// the next month so the grid always ends on a Saturday.
pub fn build_month_grid(anchor: NaiveDate, today: NaiveDate, appointments: &[Appointment]) -> Vec<DayCell> {
    let start = grid_start(anchor);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let (status, appointment_count) = day_status(date, appointments);
            DayCell {
                date,
                in_month: date.year() == anchor.year() && date.month() == anchor.month(),
                is_today: date == today,
                is_past: date < today,
                status,
                appointment_count,
            }
        })
        .collect()
}

/// Reads the grid's date range from the store and builds the month view.
pub fn month_grid_for<S: AppointmentStore + ?Sized>(
    store: &S,
    anchor: NaiveDate,
    today: NaiveDate,
) -> Result<Vec<DayCell>, SchedulingError> {
    let start = grid_start(anchor);
    let end = start + Days::new(GRID_CELLS as u64 - 1);
    let filter = AppointmentFilter {
        active_only: true,
        ..AppointmentFilter::between(start, end)
    };
    let appointments = store.list_appointments(&filter)?;
    Ok(build_month_grid(anchor, today, &appointments))
}

fn day_status(date: NaiveDate, appointments: &[Appointment]) -> (DayStatus, usize) {
    let mut pending = 0;
    let mut confirmed = 0;
    for appt in appointments.iter().filter(|a| a.date == date) {
        match appt.status {
            AppointmentStatus::Pending => pending += 1,
            AppointmentStatus::Confirmed => confirmed += 1,
            AppointmentStatus::Canceled => {}
        }
    }
    let status = match (pending > 0, confirmed > 0) {
        (false, false) => DayStatus::Available,
        (true, false) => DayStatus::Pending,
        (false, true) => DayStatus::Booked,
        (true, true) => DayStatus::Mixed,
    };
    (status, pending + confirmed)
}
