use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{DatabaseError, StoreError};
use crate::models::enums::AppointmentStatus;
use crate::models::SlotTime;

/// Outcomes of engine operations other than success.
///
/// Every variant except `Storage` is an expected, local result that the
/// caller can act on; `Storage` is passed through from the store untouched.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("slot {time} on {date} is no longer available")]
    SlotConflict { date: NaiveDate, time: SlotTime },

    #[error("cannot change appointment status from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("appointment {id} not found")]
    NotFound { id: Uuid },

    #[error("storage failure: {0}")]
    Storage(#[from] DatabaseError),
}

impl SchedulingError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        SchedulingError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<StoreError> for SchedulingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Uniqueness { date, time } => SchedulingError::SlotConflict { date, time },
            StoreError::NotFound { id } => SchedulingError::NotFound { id },
            // Only reachable when a caller skips the transition retry loop.
            StoreError::StatusChanged { current, .. } => SchedulingError::InvalidTransition {
                from: current,
                to: current,
            },
            StoreError::Database(e) => SchedulingError::Storage(e),
        }
    }
}
