use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::StoreError;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SELECT_COLUMNS: &str = "SELECT id, patient_name, patient_cpf, patient_phone, specialty,
         date, time, status, observations, created_at
         FROM appointments";

pub fn insert_appointment(
    conn: &Connection,
    candidate: &NewAppointment,
    created_at: NaiveDateTime,
) -> Result<Appointment, StoreError> {
    let id = Uuid::new_v4();
    let status = AppointmentStatus::Pending;

    let inserted = conn.execute(
        "INSERT INTO appointments (id, patient_name, patient_cpf, patient_phone, specialty,
         date, time, status, observations, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id.to_string(),
            candidate.patient_name,
            candidate.patient_cpf,
            candidate.patient_phone,
            candidate.specialty.as_str(),
            candidate.date.format(DATE_FORMAT).to_string(),
            candidate.time.to_string(),
            status.as_str(),
            candidate.observations,
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    );

    match inserted {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            return Err(StoreError::Uniqueness {
                date: candidate.date,
                time: candidate.time,
            });
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Appointment {
        id,
        patient_name: candidate.patient_name.clone(),
        patient_cpf: candidate.patient_cpf.clone(),
        patient_phone: candidate.patient_phone.clone(),
        specialty: candidate.specialty,
        date: candidate.date,
        time: candidate.time,
        status,
        observations: candidate.observations.clone(),
        // Round-trip through the stored format so the returned record
        // equals what a later read produces.
        created_at: NaiveDateTime::parse_from_str(
            &created_at.format(TIMESTAMP_FORMAT).to_string(),
            TIMESTAMP_FORMAT,
        )
        .unwrap_or(created_at),
    })
}

pub fn get_appointment(conn: &Connection, id: &Uuid) -> Result<Option<Appointment>, DatabaseError> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
    let row = conn
        .query_row(&sql, params![id.to_string()], read_row)
        .optional()?;
    row.map(row_to_appointment).transpose()
}

/// Lists appointments matching the filter, ordered by date then time.
pub fn list_appointments(
    conn: &Connection,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut sql = format!("{SELECT_COLUMNS} WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1u32;

    if let Some(date) = filter.date {
        sql.push_str(&format!(" AND date = ?{param_idx}"));
        params_vec.push(Box::new(date.format(DATE_FORMAT).to_string()));
        param_idx += 1;
    }
    if let Some(from) = filter.date_from {
        sql.push_str(&format!(" AND date >= ?{param_idx}"));
        params_vec.push(Box::new(from.format(DATE_FORMAT).to_string()));
        param_idx += 1;
    }
    if let Some(to) = filter.date_to {
        sql.push_str(&format!(" AND date <= ?{param_idx}"));
        params_vec.push(Box::new(to.format(DATE_FORMAT).to_string()));
        param_idx += 1;
    }
    if let Some(status) = filter.status {
        sql.push_str(&format!(" AND status = ?{param_idx}"));
        params_vec.push(Box::new(status.as_str()));
    } else if filter.active_only {
        sql.push_str(&format!(" AND status != ?{param_idx}"));
        params_vec.push(Box::new(AppointmentStatus::Canceled.as_str()));
    }

    sql.push_str(" ORDER BY date ASC, time ASC, created_at ASC");

    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), read_row)?;

    let mut appointments = Vec::new();
    for row in rows {
        let appointment = row_to_appointment(row?)?;
        // Unicode-aware name matching is done here rather than in SQL,
        // since SQLite's LOWER() only folds ASCII.
        if filter.matches_search(&appointment) {
            appointments.push(appointment);
        }
    }
    Ok(appointments)
}

pub fn update_appointment_status(
    conn: &Connection,
    id: &Uuid,
    expected: AppointmentStatus,
    status: AppointmentStatus,
) -> Result<Appointment, StoreError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE id = ?2 AND status = ?3",
        params![status.as_str(), id.to_string(), expected.as_str()],
    )?;

    let current = get_appointment(conn, id)?.ok_or(StoreError::NotFound { id: *id })?;
    if changed == 0 {
        return Err(StoreError::StatusChanged {
            id: *id,
            current: current.status,
        });
    }
    Ok(current)
}

type AppointmentRow = (
    String, String, String, String, String,
    String, String, String, Option<String>, String,
);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn row_to_appointment(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    let (
        id, patient_name, patient_cpf, patient_phone, specialty,
        date, time, status, observations, created_at,
    ) = row;

    Ok(Appointment {
        id: Uuid::parse_str(&id).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        patient_name,
        patient_cpf,
        patient_phone,
        specialty: Specialty::from_str(&specialty)?,
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| DatabaseError::ConstraintViolation(format!("date {date:?}: {e}")))?,
        time: SlotTime::from_str(&time)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        status: AppointmentStatus::from_str(&status)?,
        observations,
        created_at: NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT).map_err(|e| {
            DatabaseError::ConstraintViolation(format!("created_at {created_at:?}: {e}"))
        })?,
    })
}
