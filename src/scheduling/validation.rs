//! Field checks for booking requests.
//!
//! Each check returns the normalised value, so the booking engine stores
//! digits-only CPF and phone numbers and a trimmed name.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::SchedulingError;
use super::slots::is_catalog_slot;
use crate::models::enums::Specialty;
use crate::models::{NewAppointment, SlotTime};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 200;
pub const OBSERVATIONS_MAX_CHARS: usize = 2000;

/// Booking request as submitted by a client.
///
/// Everything arrives as text; `status` is accepted for compatibility and
/// ignored, since new appointments always start out pending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    pub patient_name: String,
    pub patient_cpf: String,
    pub patient_phone: String,
    pub specialty: String,
    pub date: String, // YYYY-MM-DD
    pub time: String, // HH:MM
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Structural validation, first failure wins, in the order
/// name → CPF → phone → specialty → date → time → observations.
pub fn validate_request(
    request: &BookingRequest,
    today: NaiveDate,
) -> Result<NewAppointment, SchedulingError> {
    let patient_name = validate_name(&request.patient_name)?;
    let patient_cpf = validate_cpf(&request.patient_cpf)?;
    let patient_phone = validate_phone(&request.patient_phone)?;
    let specialty = validate_specialty(&request.specialty)?;
    let date = validate_date(&request.date, today)?;
    let time = validate_time(&request.time)?;
    let observations = validate_observations(request.observations.as_deref())?;

    Ok(NewAppointment {
        patient_name,
        patient_cpf,
        patient_phone,
        specialty,
        date,
        time,
        observations,
    })
}

pub fn validate_name(raw: &str) -> Result<String, SchedulingError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len < NAME_MIN_CHARS {
        return Err(SchedulingError::validation(
            "patient_name",
            format!("must have at least {NAME_MIN_CHARS} characters"),
        ));
    }
    if len > NAME_MAX_CHARS {
        return Err(SchedulingError::validation("patient_name", "too long"));
    }
    Ok(name.to_string())
}

/// Brazilian CPF: 11 digits, the last two being mod-11 check digits over
/// the first nine (weights 10..2) and first ten (weights 11..2).
/// Punctuation is ignored; all-equal sequences are rejected.
pub fn validate_cpf(raw: &str) -> Result<String, SchedulingError> {
    let digits = digits_only(raw);
    if digits.len() != 11 {
        return Err(SchedulingError::validation("patient_cpf", "must have 11 digits"));
    }
    if is_valid_cpf(&digits) {
        Ok(digits)
    } else {
        Err(SchedulingError::validation("patient_cpf", "check digits do not match"))
    }
}

fn is_valid_cpf(digits: &str) -> bool {
    let d: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if d.len() != 11 || d.iter().all(|&x| x == d[0]) {
        return false;
    }
    let check = |len: usize| -> u32 {
        let sum: u32 = d[..len]
            .iter()
            .zip((2..=len as u32 + 1).rev())
            .map(|(digit, weight)| digit * weight)
            .sum();
        match (sum * 10) % 11 {
            10 => 0,
            r => r,
        }
    };
    check(9) == d[9] && check(10) == d[10]
}

/// Phone with area code: 10 (landline) or 11 (mobile) digits.
pub fn validate_phone(raw: &str) -> Result<String, SchedulingError> {
    let digits = digits_only(raw);
    if (10..=11).contains(&digits.len()) {
        Ok(digits)
    } else {
        Err(SchedulingError::validation("patient_phone", "must have 10 or 11 digits"))
    }
}

pub fn validate_specialty(raw: &str) -> Result<Specialty, SchedulingError> {
    Specialty::from_str(raw.trim())
        .map_err(|_| SchedulingError::validation("specialty", format!("unknown specialty {raw:?}")))
}

pub fn validate_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, SchedulingError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| SchedulingError::validation("date", "expected a calendar date YYYY-MM-DD"))?;
    if date < today {
        return Err(SchedulingError::validation("date", "cannot book a day in the past"));
    }
    Ok(date)
}

pub fn validate_time(raw: &str) -> Result<SlotTime, SchedulingError> {
    let time = SlotTime::from_str(raw)
        .map_err(|_| SchedulingError::validation("time", "expected HH:MM"))?;
    if !is_catalog_slot(&time) {
        return Err(SchedulingError::validation(
            "time",
            format!("{time} is not a bookable slot"),
        ));
    }
    Ok(time)
}

fn validate_observations(raw: Option<&str>) -> Result<Option<String>, SchedulingError> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > OBSERVATIONS_MAX_CHARS {
        return Err(SchedulingError::validation(
            "observations",
            format!("too long (max {OBSERVATIONS_MAX_CHARS} chars)"),
        ));
    }
    Ok(Some(text.to_string()))
}

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
