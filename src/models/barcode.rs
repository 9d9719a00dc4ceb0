use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::BarcodeStatus;

/// Parsed equipment date code. Created once at scan time by the parser and
/// immutable thereafter; removal from an item's set is the only "update".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodeData {
    /// Raw scanned text, trimmed.
    pub original_code: String,
    /// Full four-digit manufacture year (0 when invalid).
    pub year: i32,
    /// Week number within the manufacture year, 1-based (0 when invalid).
    pub week: u32,
    pub production_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: BarcodeStatus,
    /// Whole calendar months until expiry; negative once past (0 when invalid).
    pub months_left: i32,
}

impl BarcodeData {
    /// The invalid variant: structural validation failed. Numeric fields are
    /// zeroed and the dates are placeholders that must never be interpreted.
    pub fn invalid(original_code: String) -> Self {
        Self {
            original_code,
            year: 0,
            week: 0,
            production_date: NaiveDate::default(),
            expiry_date: NaiveDate::default(),
            status: BarcodeStatus::Invalid,
            months_left: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status != BarcodeStatus::Invalid
    }
}

/// Store-boundary record: parser output plus the capture instant the caller
/// supplies at acceptance time. Kept separate so the parser stays pure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedBarcode {
    #[serde(flatten)]
    pub data: BarcodeData,
    pub scanned_at: DateTime<Utc>,
}
