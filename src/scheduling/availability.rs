use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::SchedulingError;
use super::slots::catalog_slots;
use crate::db::AppointmentStore;
use crate::models::enums::SlotState;
use crate::models::{Appointment, AppointmentFilter, SlotTime};

/// One catalog slot with its state on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub time: SlotTime,
    pub state: SlotState,
}

/// Catalog slots still free on `date`, earliest first.
///
/// A slot is taken by a pending or confirmed appointment on that exact
/// date and time; canceled appointments leave it free. Days before
/// `today` have no free slots at all. Appointments on other dates are
/// ignored.
pub fn available_slots(date: NaiveDate, today: NaiveDate, existing: &[Appointment]) -> Vec<SlotTime> {
    if date < today {
        return Vec::new();
    }
    let taken = occupied_times(date, existing);
    catalog_slots()
        .iter()
        .filter(|slot| !taken.contains(slot))
        .copied()
        .collect()
}

/// Every catalog slot on `date`, tagged booked / available / unavailable.
///
/// `booked` wins over `unavailable`: a past day still shows which slots
/// were held.
pub fn slot_board(date: NaiveDate, today: NaiveDate, existing: &[Appointment]) -> Vec<SlotAvailability> {
    let taken = occupied_times(date, existing);
    let free: HashSet<SlotTime> = available_slots(date, today, existing).into_iter().collect();

    catalog_slots()
        .iter()
        .map(|&time| {
            let state = if taken.contains(&time) {
                SlotState::Booked
            } else if free.contains(&time) {
                SlotState::Available
            } else {
                SlotState::Unavailable
            };
            SlotAvailability { time, state }
        })
        .collect()
}

/// Reads `date` from the store and returns its free slots.
pub fn available_slots_for<S: AppointmentStore + ?Sized>(
    store: &S,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<Vec<SlotTime>, SchedulingError> {
    if date < today {
        return Ok(Vec::new());
    }
    let existing = store.list_appointments(&AppointmentFilter::on_date(date))?;
    Ok(available_slots(date, today, &existing))
}

/// Reads `date` from the store and returns the full slot board.
pub fn slot_board_for<S: AppointmentStore + ?Sized>(
    store: &S,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<Vec<SlotAvailability>, SchedulingError> {
    let existing = store.list_appointments(&AppointmentFilter::on_date(date))?;
    Ok(slot_board(date, today, &existing))
}

fn occupied_times(date: NaiveDate, existing: &[Appointment]) -> HashSet<SlotTime> {
    existing
        .iter()
        .filter(|a| a.date == date && a.status.occupies_slot())
        .map(|a| a.time)
        .collect()
}
