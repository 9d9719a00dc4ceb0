use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A piece of equipment (boiler, cylinder, regulator) that owns a set of
/// scanned date codes, keyed by original code within the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: Uuid,
    pub name: String,
    /// Job this item is installed under, if any.
    pub job_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
