//! Repository layer — entity-scoped database operations.
//!
//! `AppointmentStore` is the storage contract the scheduling engine is
//! written against. `rusqlite::Connection` implements it directly, so
//! callers pass whichever connection they own into each engine call.

mod appointment;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

use super::DatabaseError;
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, AppointmentFilter, NewAppointment, SlotTime};

pub use appointment::*;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("slot {date} {time} is already held by an active appointment")]
    Uniqueness { date: NaiveDate, time: SlotTime },

    #[error("appointment {id} not found")]
    NotFound { id: Uuid },

    #[error("appointment {id} is now {current}")]
    StatusChanged { id: Uuid, current: AppointmentStatus },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(DatabaseError::from(err))
    }
}

/// Durable source of truth for appointment records.
pub trait AppointmentStore {
    /// Appointments matching `filter`, ordered by date then time ascending.
    fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, StoreError>;

    fn get_appointment(&self, id: &Uuid) -> Result<Option<Appointment>, StoreError>;

    /// Writes a new `pending` appointment with a fresh id.
    ///
    /// Fails with `StoreError::Uniqueness` when another active appointment
    /// already holds `(date, time)`; the check happens at write time.
    fn insert_appointment(
        &self,
        candidate: &NewAppointment,
        created_at: NaiveDateTime,
    ) -> Result<Appointment, StoreError>;

    /// Compare-and-set status update: only writes while the stored status
    /// still equals `expected`. Otherwise returns `StatusChanged` carrying
    /// the status actually stored.
    fn update_appointment_status(
        &self,
        id: &Uuid,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError>;
}

impl AppointmentStore for rusqlite::Connection {
    fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, StoreError> {
        Ok(appointment::list_appointments(self, filter)?)
    }

    fn get_appointment(&self, id: &Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(appointment::get_appointment(self, id)?)
    }

    fn insert_appointment(
        &self,
        candidate: &NewAppointment,
        created_at: NaiveDateTime,
    ) -> Result<Appointment, StoreError> {
        appointment::insert_appointment(self, candidate, created_at)
    }

    fn update_appointment_status(
        &self,
        id: &Uuid,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> Result<Appointment, StoreError> {
        appointment::update_appointment_status(self, id, expected, status)
    }
}
