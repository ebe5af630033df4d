//! Appointment book views: staff list, public upcoming list, lookup by id.
//!
//! Thin read paths over the store that share the engine's error type, so
//! the HTTP layer maps every outcome the same way.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::AppointmentStore;
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, AppointmentFilter};
use crate::scheduling::SchedulingError;

/// Staff list, optionally narrowed to one status and a search term
/// (patient name, or digits of the phone number).
pub fn list_appointments<S: AppointmentStore + ?Sized>(
    store: &S,
    status: Option<AppointmentStatus>,
    search: Option<&str>,
) -> Result<Vec<Appointment>, SchedulingError> {
    let filter = AppointmentFilter {
        status,
        search: search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        ..AppointmentFilter::default()
    };
    Ok(store.list_appointments(&filter)?)
}

/// Non-canceled appointments from `today` onward, soonest first.
pub fn upcoming_appointments<S: AppointmentStore + ?Sized>(
    store: &S,
    today: NaiveDate,
) -> Result<Vec<Appointment>, SchedulingError> {
    let filter = AppointmentFilter {
        date_from: Some(today),
        active_only: true,
        ..AppointmentFilter::default()
    };
    Ok(store.list_appointments(&filter)?)
}

pub fn find_appointment<S: AppointmentStore + ?Sized>(
    store: &S,
    id: &Uuid,
) -> Result<Appointment, SchedulingError> {
    store
        .get_appointment(id)?
        .ok_or(SchedulingError::NotFound { id: *id })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use rusqlite::Connection;

    use super::*;
    use crate::db::open_memory_database;
    use crate::models::enums::Specialty;
    use crate::models::{NewAppointment, SlotTime};
    use crate::scheduling::update_status;

    fn add(conn: &Connection, name: &str, phone: &str, date: &str, time: SlotTime) -> Appointment {
        conn.insert_appointment(
            &NewAppointment {
                patient_name: name.into(),
                patient_cpf: "52998224725".into(),
                patient_phone: phone.into(),
                specialty: Specialty::Emergency,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                time,
                observations: None,
            },
            NaiveDateTime::default(),
        )
        .unwrap()
    }

    #[test]
    fn staff_list_filters_by_status_and_search() {
        let conn = open_memory_database().unwrap();
        let a = add(&conn, "Renata Costa", "11987654321", "2024-06-13", SlotTime::new(8, 0));
        add(&conn, "Paulo Nunes", "2133334444", "2024-06-13", SlotTime::new(8, 30));
        update_status(&conn, &a.id, AppointmentStatus::Confirmed).unwrap();

        assert_eq!(list_appointments(&conn, None, None).unwrap().len(), 2);
        assert_eq!(list_appointments(&conn, None, Some("   ")).unwrap().len(), 2);

        let confirmed = list_appointments(&conn, Some(AppointmentStatus::Confirmed), None).unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, a.id);

        let by_name = list_appointments(&conn, None, Some("paulo")).unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].patient_name, "Paulo Nunes");

        let by_phone = list_appointments(&conn, None, Some("98765")).unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].id, a.id);
    }

    #[test]
    fn upcoming_skips_past_and_canceled() {
        let conn = open_memory_database().unwrap();
        add(&conn, "Passado", "11987654321", "2024-06-11", SlotTime::new(8, 0));
        let later = add(&conn, "Depois", "11987654321", "2024-06-20", SlotTime::new(8, 0));
        let today = add(&conn, "Hoje", "11987654321", "2024-06-12", SlotTime::new(17, 30));
        let gone = add(&conn, "Cancelado", "11987654321", "2024-06-13", SlotTime::new(8, 0));
        update_status(&conn, &gone.id, AppointmentStatus::Canceled).unwrap();

        let upcoming =
            upcoming_appointments(&conn, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()).unwrap();
        let ids: Vec<_> = upcoming.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![today.id, later.id]);
    }

    #[test]
    fn find_missing_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = find_appointment(&conn, &Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound { .. }));
    }
}
