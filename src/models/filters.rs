use chrono::NaiveDate;

use super::appointment::Appointment;
use super::enums::AppointmentStatus;

#[derive(Debug, Default, Clone)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    /// Drop canceled rows. Ignored when `status` is set.
    pub active_only: bool,
    /// Case-insensitive match on patient name, or digit match on phone.
    pub search: Option<String>,
}

impl AppointmentFilter {
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            date_from: Some(from),
            date_to: Some(to),
            ..Self::default()
        }
    }

    pub fn matches_search(&self, appointment: &Appointment) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        if appointment
            .patient_name
            .to_lowercase()
            .contains(&term.to_lowercase())
        {
            return true;
        }
        let digits: String = term.chars().filter(char::is_ascii_digit).collect();
        !digits.is_empty() && appointment.patient_phone.contains(&digits)
    }
}
