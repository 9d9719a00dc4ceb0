//! Scan acceptance workflow for equipment date codes.
//!
//! A scanner or OCR pass (external to this crate) hands over a decoded
//! string; the workflow parses it, rejects structural failures and duplicates
//! without touching the store, and otherwise appends the record to the owning
//! stock item's barcode set together with the capture instant.
//!
//! Rejections are values the UI surfaces as blocking messages while keeping
//! the scan view open; only store failures are errors.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::barcode;
use crate::db::repository::stock;
use crate::db::DatabaseError;
use crate::models::PersistedBarcode;

/// Result of attempting to accept a scanned code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Parsed, deduplicated and persisted.
    Accepted(PersistedBarcode),
    /// The code failed structural validation; nothing was persisted.
    InvalidFormat,
    /// The item already holds this exact code; nothing was persisted.
    Duplicate,
}

/// Accept a freshly scanned code against the current local date.
pub fn accept_scan(
    conn: &Connection,
    item_id: &Uuid,
    raw_code: &str,
    scanned_at: DateTime<Utc>,
) -> Result<ScanOutcome, DatabaseError> {
    accept_scan_at(conn, item_id, raw_code, scanned_at, Local::now().date_naive())
}

/// Accept a freshly scanned code with an explicit "today" for classification.
///
/// The duplicate check and the append are two separate store calls, not one
/// transaction; two concurrent scans of the same code can both pass the
/// check. The append keys on `(stock_item_id, original_code)` and ignores
/// the second insert, so no duplicate row results.
pub fn accept_scan_at(
    conn: &Connection,
    item_id: &Uuid,
    raw_code: &str,
    scanned_at: DateTime<Utc>,
    today: NaiveDate,
) -> Result<ScanOutcome, DatabaseError> {
    let data = barcode::parse_at(raw_code, today);
    if !data.is_valid() {
        tracing::debug!(code = %data.original_code, "scan rejected: unreadable date code");
        return Ok(ScanOutcome::InvalidFormat);
    }

    stock::get_stock_item(conn, item_id)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "stock_item".into(),
        id: item_id.to_string(),
    })?;

    if stock::barcode_exists(conn, item_id, &data.original_code)? {
        tracing::debug!(
            item = %item_id,
            code = %data.original_code,
            "scan rejected: code already on item"
        );
        return Ok(ScanOutcome::Duplicate);
    }

    let record = PersistedBarcode { data, scanned_at };
    stock::append_barcode(conn, item_id, &record)?;

    tracing::info!(
        item = %item_id,
        code = %record.data.original_code,
        status = record.data.status.as_str(),
        "barcode accepted"
    );
    Ok(ScanOutcome::Accepted(record))
}

/// Remove one stored record from an item's set, matched by original code.
pub fn remove_barcode(
    conn: &Connection,
    item_id: &Uuid,
    original_code: &str,
) -> Result<bool, DatabaseError> {
    let removed = stock::remove_barcode(conn, item_id, original_code)?;
    if removed {
        tracing::info!(item = %item_id, code = %original_code, "barcode removed");
    }
    Ok(removed)
}
