use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AppointmentStatus, Specialty};
use super::slot::SlotTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_name: String,
    /// 11 digits, no punctuation.
    pub patient_cpf: String,
    /// 10 or 11 digits (area code included), no punctuation.
    pub patient_phone: String,
    pub specialty: Specialty,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub status: AppointmentStatus,
    pub observations: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A validated booking candidate, ready to be written by the store.
///
/// Carries no id, status or timestamp: the store assigns those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_name: String,
    pub patient_cpf: String,
    pub patient_phone: String,
    pub specialty: Specialty,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub observations: Option<String>,
}
