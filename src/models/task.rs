use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An unassigned punch-list item in the routine task pool. Carries its own
/// address and contact metadata; not linked to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineTask {
    pub id: Uuid,
    pub title: String,
    pub address: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}
