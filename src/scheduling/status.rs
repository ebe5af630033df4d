use uuid::Uuid;

use super::error::SchedulingError;
use crate::db::{AppointmentStore, StoreError};
use crate::models::enums::AppointmentStatus;
use crate::models::Appointment;

/// Transitions only move forward (pending → confirmed → canceled), so a
/// stale compare-and-set can be re-validated at most twice.
const MAX_STATUS_WRITE_ATTEMPTS: usize = 3;

/// What a legal status change requires from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Apply,
    NoOp,
}

/// | from      | to        |              |
/// |-----------|-----------|--------------|
/// | pending   | confirmed | apply        |
/// | pending   | canceled  | apply        |
/// | confirmed | canceled  | apply        |
/// | confirmed | confirmed | no-op        |
/// | canceled  | any       | rejected     |
/// | any       | pending   | rejected     |
pub fn check_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<Transition, SchedulingError> {
    use AppointmentStatus::*;

    match (from, to) {
        (Pending, Confirmed) | (Pending, Canceled) | (Confirmed, Canceled) => Ok(Transition::Apply),
        (Confirmed, Confirmed) => Ok(Transition::NoOp),
        _ => Err(SchedulingError::InvalidTransition { from, to }),
    }
}

/// Statuses reachable from `from` with an actual write.
pub fn next_statuses(from: AppointmentStatus) -> Vec<AppointmentStatus> {
    AppointmentStatus::ALL
        .iter()
        .copied()
        .filter(|&to| matches!(check_transition(from, to), Ok(Transition::Apply)))
        .collect()
}

/// Moves appointment `id` to `to`, validating against the stored status.
///
/// The write is conditional on the status read just before it. If another
/// request changed the row in between, the transition is re-checked
/// against the fresh status instead of overwriting it.
pub fn update_status<S: AppointmentStore + ?Sized>(
    store: &S,
    id: &Uuid,
    to: AppointmentStatus,
) -> Result<Appointment, SchedulingError> {
    let mut current = store
        .get_appointment(id)?
        .ok_or(SchedulingError::NotFound { id: *id })?;

    for _ in 0..MAX_STATUS_WRITE_ATTEMPTS {
        let from = current.status;
        let transition = match check_transition(from, to) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(appointment_id = %id, %from, %to, "Rejected status transition");
                return Err(e);
            }
        };
        if transition == Transition::NoOp {
            return Ok(current);
        }

        match store.update_appointment_status(id, from, to) {
            Ok(updated) => {
                tracing::info!(appointment_id = %id, %from, %to, "Appointment status changed");
                return Ok(updated);
            }
            Err(StoreError::StatusChanged { current: fresh, .. }) => {
                tracing::debug!(appointment_id = %id, expected = %from, actual = %fresh, "Status changed concurrently, re-checking");
                current.status = fresh;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(SchedulingError::InvalidTransition {
        from: current.status,
        to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::enums::Specialty;
    use crate::models::NewAppointment;
    use crate::models::SlotTime;
    use chrono::{NaiveDate, NaiveDateTime};
    use crate::models::enums::AppointmentStatus::*;
    use rusqlite::Connection;

    fn seed(conn: &Connection) -> Appointment {
        conn.insert_appointment(
            &NewAppointment {
                patient_name: "Joana Prado".into(),
                patient_cpf: "52998224725".into(),
                patient_phone: "11987654321".into(),
                specialty: Specialty::Orthodontics,
                date: NaiveDate::from_ymd_opt(2024, 6, 13).unwrap(),
                time: SlotTime::new(10, 0),
                observations: None,
            },
            NaiveDateTime::default(),
        )
        .unwrap()
    }

    #[test]
    fn transition_table() {
        assert_eq!(check_transition(Pending, Confirmed).unwrap(), Transition::Apply);
        assert_eq!(check_transition(Pending, Canceled).unwrap(), Transition::Apply);
        assert_eq!(check_transition(Confirmed, Canceled).unwrap(), Transition::Apply);
        assert_eq!(check_transition(Confirmed, Confirmed).unwrap(), Transition::NoOp);
        assert!(check_transition(Pending, Pending).is_err());
        assert!(check_transition(Confirmed, Pending).is_err());
    }

    #[test]
    fn canceled_is_final() {
        for &to in AppointmentStatus::ALL {
            assert!(matches!(
                check_transition(Canceled, to),
                Err(SchedulingError::InvalidTransition { from: Canceled, .. })
            ));
        }
        assert!(next_statuses(Canceled).is_empty());
    }

    #[test]
    fn next_statuses_from_pending() {
        assert_eq!(next_statuses(Pending), vec![Confirmed, Canceled]);
        assert_eq!(next_statuses(Confirmed), vec![Canceled]);
    }

    #[test]
    fn confirm_then_cancel() {
        let conn = open_memory_database().unwrap();
        let appt = seed(&conn);

        let confirmed = update_status(&conn, &appt.id, Confirmed).unwrap();
        assert_eq!(confirmed.status, Confirmed);

        let again = update_status(&conn, &appt.id, Confirmed).unwrap();
        assert_eq!(again, confirmed);

        let canceled = update_status(&conn, &appt.id, Canceled).unwrap();
        assert_eq!(canceled.status, Canceled);
    }

    #[test]
    fn canceled_cannot_be_resurrected() {
        let conn = open_memory_database().unwrap();
        let appt = seed(&conn);
        update_status(&conn, &appt.id, Canceled).unwrap();

        for &to in AppointmentStatus::ALL {
            let err = update_status(&conn, &appt.id, to).unwrap_err();
            assert!(matches!(err, SchedulingError::InvalidTransition { from: Canceled, .. }));
        }
        let stored = conn.get_appointment(&appt.id).unwrap().unwrap();
        assert_eq!(stored.status, Canceled);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let conn = open_memory_database().unwrap();
        let id = Uuid::new_v4();
        let err = update_status(&conn, &id, Confirmed).unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound { id: missing } if missing == id));
    }

    /// Store whose first read is stale: it reports `pending` while the row
    /// has already been canceled by someone else.
    struct StaleRead {
        conn: Connection,
        stale: Appointment,
    }

    impl AppointmentStore for StaleRead {
        fn list_appointments(
            &self,
            filter: &crate::models::AppointmentFilter,
        ) -> Result<Vec<Appointment>, StoreError> {
            self.conn.list_appointments(filter)
        }
        fn get_appointment(&self, _id: &Uuid) -> Result<Option<Appointment>, StoreError> {
            Ok(Some(self.stale.clone()))
        }
        fn insert_appointment(
            &self,
            candidate: &NewAppointment,
            created_at: NaiveDateTime,
        ) -> Result<Appointment, StoreError> {
            self.conn.insert_appointment(candidate, created_at)
        }
        fn update_appointment_status(
            &self,
            id: &Uuid,
            expected: AppointmentStatus,
            status: AppointmentStatus,
        ) -> Result<Appointment, StoreError> {
            self.conn.update_appointment_status(id, expected, status)
        }
    }

    #[test]
    fn stale_read_does_not_overwrite_concurrent_cancel() {
        let conn = open_memory_database().unwrap();
        let appt = seed(&conn);
        update_status(&conn, &appt.id, Canceled).unwrap();

        let store = StaleRead { conn, stale: appt.clone() };
        let err = update_status(&store, &appt.id, Confirmed).unwrap_err();
        assert!(matches!(
            err,
            SchedulingError::InvalidTransition { from: Canceled, to: Confirmed }
        ));
        let stored = store.conn.get_appointment(&appt.id).unwrap().unwrap();
        assert_eq!(stored.status, Canceled);
    }
}
