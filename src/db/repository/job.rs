use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{parse_instant, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{Job, JobStatus};

pub fn insert_job(conn: &Connection, job: &Job) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO jobs (id, customer_name, phone, address, latitude, longitude, notes,
         status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            job.id.to_string(),
            job.customer_name,
            job.phone,
            job.address,
            job.latitude,
            job.longitude,
            job.notes,
            job.status.as_str(),
            job.created_at.to_rfc3339(),
            job.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_job(conn: &Connection, id: &Uuid) -> Result<Option<Job>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, customer_name, phone, address, latitude, longitude, notes,
             status, created_at, updated_at
             FROM jobs WHERE id = ?1",
            params![id.to_string()],
            |row| Ok(job_row(row)),
        )
        .optional()?;

    match row {
        Some(row) => Ok(Some(job_from_row(row?)?)),
        None => Ok(None),
    }
}

pub fn list_jobs(conn: &Connection) -> Result<Vec<Job>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, customer_name, phone, address, latitude, longitude, notes,
         status, created_at, updated_at
         FROM jobs ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map([], |row| Ok(job_row(row)))?;

    let mut jobs = Vec::new();
    for row in rows {
        jobs.push(job_from_row(row??)?);
    }
    Ok(jobs)
}

pub fn list_jobs_by_status(
    conn: &Connection,
    status: JobStatus,
) -> Result<Vec<Job>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, customer_name, phone, address, latitude, longitude, notes,
         status, created_at, updated_at
         FROM jobs WHERE status = ?1 ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map(params![status.as_str()], |row| Ok(job_row(row)))?;

    let mut jobs = Vec::new();
    for row in rows {
        jobs.push(job_from_row(row??)?);
    }
    Ok(jobs)
}

pub fn set_job_status(
    conn: &Connection,
    id: &Uuid,
    status: JobStatus,
    updated_at: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE jobs SET status = ?2, updated_at = ?3 WHERE id = ?1",
        params![id.to_string(), status.as_str(), updated_at.to_rfc3339()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "job".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_job(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM jobs WHERE id = ?1", params![id.to_string()])?;
    Ok(())
}

// Internal row type for Job mapping
struct JobRow {
    id: String,
    customer_name: String,
    phone: Option<String>,
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    notes: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

fn job_row(row: &rusqlite::Row<'_>) -> Result<JobRow, rusqlite::Error> {
    Ok(JobRow {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        phone: row.get(2)?,
        address: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        notes: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn job_from_row(row: JobRow) -> Result<Job, DatabaseError> {
    Ok(Job {
        id: parse_uuid(&row.id)?,
        customer_name: row.customer_name,
        phone: row.phone,
        address: row.address,
        latitude: row.latitude,
        longitude: row.longitude,
        notes: row.notes,
        status: JobStatus::from_str(&row.status)?,
        created_at: parse_instant(&row.created_at)?,
        updated_at: parse_instant(&row.updated_at)?,
    })
}
