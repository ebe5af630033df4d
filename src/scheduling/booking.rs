use chrono::NaiveDateTime;

use super::availability::available_slots_for;
use super::error::SchedulingError;
use super::validation::{validate_request, BookingRequest};
use crate::db::AppointmentStore;
use crate::models::Appointment;

/// Validates `request` and books its slot as a new `pending` appointment.
///
/// Field checks run first, then availability is re-read from the store.
/// The store's write-time uniqueness guard settles any race that slips
/// past the availability read: losing it also yields `SlotConflict`.
/// Nothing is written on any error path.
pub fn create_appointment<S: AppointmentStore + ?Sized>(
    store: &S,
    request: &BookingRequest,
    now: NaiveDateTime,
) -> Result<Appointment, SchedulingError> {
    let today = now.date();

    let candidate = validate_request(request, today).map_err(|e| {
        tracing::debug!(error = %e, "Booking request rejected");
        e
    })?;

    if let Some(status) = request.status.as_deref() {
        tracing::debug!(requested = status, "Ignoring client-supplied status on booking");
    }

    let free = available_slots_for(store, candidate.date, today)?;
    if !free.contains(&candidate.time) {
        tracing::warn!(date = %candidate.date, time = %candidate.time, "Slot already taken");
        return Err(SchedulingError::SlotConflict {
            date: candidate.date,
            time: candidate.time,
        });
    }

    let appointment = store.insert_appointment(&candidate, now).map_err(|e| {
        let e = SchedulingError::from(e);
        if matches!(e, SchedulingError::SlotConflict { .. }) {
            tracing::warn!(date = %candidate.date, time = %candidate.time, "Slot taken by a concurrent booking");
        }
        e
    })?;

    tracing::info!(
        appointment_id = %appointment.id,
        date = %appointment.date,
        time = %appointment.time,
        specialty = %appointment.specialty,
        "Appointment booked"
    );
    Ok(appointment)
}
