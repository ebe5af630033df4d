use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::SchedulingError;
use crate::db::AppointmentStore;
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, AppointmentFilter};

/// Aggregate load figures for the staff dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentStatistics {
    /// Active appointments on the current day.
    pub today_count: usize,
    /// Active appointments Monday through Sunday of the current week.
    pub week_count: usize,
    /// Active appointments from today onward, whatever their status.
    /// Despite the name this is upcoming load, not `status == pending`.
    pub pending_count: usize,
    /// Canceled appointments, all time.
    pub canceled_count: usize,
}

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Days::new(u64::from(day.weekday().num_days_from_monday()))
}

/// Counts over a snapshot of the whole appointment set, relative to `now`.
pub fn compute_statistics(now: NaiveDateTime, appointments: &[Appointment]) -> AppointmentStatistics {
    let today = now.date();
    let monday = week_start(today);
    let sunday = monday + Days::new(6);

    let mut stats = AppointmentStatistics::default();
    for appt in appointments {
        if appt.status == AppointmentStatus::Canceled {
            stats.canceled_count += 1;
            continue;
        }
        if appt.date == today {
            stats.today_count += 1;
        }
        if (monday..=sunday).contains(&appt.date) {
            stats.week_count += 1;
        }
        if appt.date >= today {
            stats.pending_count += 1;
        }
    }
    stats
}

/// Reads every appointment from the store and aggregates it.
pub fn statistics_for<S: AppointmentStore + ?Sized>(
    store: &S,
    now: NaiveDateTime,
) -> Result<AppointmentStatistics, SchedulingError> {
    let all = store.list_appointments(&AppointmentFilter::default())?;
    Ok(compute_statistics(now, &all))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Specialty;
    use crate::models::SlotTime;
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(date: &str, h: u32) -> NaiveDateTime {
        d(date).and_hms_opt(h, 0, 0).unwrap()
    }

    fn appt(date: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            patient_name: "Paciente".into(),
            patient_cpf: "52998224725".into(),
            patient_phone: "11987654321".into(),
            specialty: Specialty::Whitening,
            date: d(date),
            time: SlotTime::new(8, 0),
            status,
            observations: None,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(week_start(d("2024-06-12")), d("2024-06-10"));
        assert_eq!(week_start(d("2024-06-10")), d("2024-06-10"));
        // Sunday belongs to the week that started six days earlier.
        assert_eq!(week_start(d("2024-06-16")), d("2024-06-10"));
    }

    #[test]
    fn mid_week_snapshot() {
        let all = vec![
            appt("2024-06-10", AppointmentStatus::Confirmed),
            appt("2024-06-14", AppointmentStatus::Pending),
            appt("2024-05-01", AppointmentStatus::Canceled),
        ];
        let stats = compute_statistics(at("2024-06-12", 10), &all);
        assert_eq!(stats.week_count, 2);
        assert_eq!(stats.today_count, 0);
        assert_eq!(stats.canceled_count, 1);
        assert_eq!(stats.pending_count, 1);
    }

    #[test]
    fn today_and_week_bounds() {
        let all = vec![
            appt("2024-06-12", AppointmentStatus::Pending),
            appt("2024-06-12", AppointmentStatus::Confirmed),
            appt("2024-06-12", AppointmentStatus::Canceled),
            appt("2024-06-09", AppointmentStatus::Confirmed), // previous Sunday
            appt("2024-06-16", AppointmentStatus::Confirmed), // this Sunday
            appt("2024-06-17", AppointmentStatus::Pending),   // next Monday
        ];
        let stats = compute_statistics(at("2024-06-12", 18), &all);
        assert_eq!(stats.today_count, 2);
        assert_eq!(stats.week_count, 3);
        assert_eq!(stats.pending_count, 4);
        assert_eq!(stats.canceled_count, 1);
    }

    #[test]
    fn sunday_now_counts_the_week_before() {
        let all = vec![
            appt("2024-06-10", AppointmentStatus::Confirmed),
            appt("2024-06-17", AppointmentStatus::Confirmed),
        ];
        let stats = compute_statistics(at("2024-06-16", 9), &all);
        assert_eq!(stats.week_count, 1);
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        assert_eq!(
            compute_statistics(at("2024-06-12", 9), &[]),
            AppointmentStatistics::default()
        );
    }
}
