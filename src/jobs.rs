//! Job pipeline — board data and stage transitions.
//!
//! Jobs move through a fixed linear pipeline (to-check → checked →
//! deposit-paid → gas-opened → service-directed). The board view groups jobs
//! into one column per stage; advancement only ever moves a job to the next
//! stage, never backwards or across.

use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::repository::job;
use crate::db::DatabaseError;
use crate::models::{Job, JobStatus};

/// One board column: a pipeline stage and its jobs, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: JobStatus,
    pub jobs: Vec<Job>,
}

/// All board columns in pipeline order, including empty ones.
pub fn board(conn: &Connection) -> Result<Vec<BoardColumn>, DatabaseError> {
    let mut columns = Vec::with_capacity(JobStatus::ALL.len());
    for status in JobStatus::ALL {
        columns.push(BoardColumn {
            status,
            jobs: job::list_jobs_by_status(conn, status)?,
        });
    }
    Ok(columns)
}

/// Move a job to the next pipeline stage and return the new status.
pub fn advance_job(conn: &Connection, job_id: &Uuid) -> Result<JobStatus, DatabaseError> {
    let current = job::get_job(conn, job_id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "job".into(),
        id: job_id.to_string(),
    })?;

    let next = current.status.next().ok_or_else(|| {
        DatabaseError::ConstraintViolation(format!(
            "job {job_id} is already at the final stage"
        ))
    })?;

    job::set_job_status(conn, job_id, next, Utc::now())?;
    tracing::info!(job = %job_id, from = current.status.as_str(), to = next.as_str(), "job advanced");
    Ok(next)
}
