use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{parse_date, parse_instant, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{BarcodeData, BarcodeStatus, PersistedBarcode, StockItem};

// ═══════════════════════════════════════════
// Stock items
// ═══════════════════════════════════════════

pub fn insert_stock_item(conn: &Connection, item: &StockItem) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO stock_items (id, name, job_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            item.id.to_string(),
            item.name,
            item.job_id.map(|id| id.to_string()),
            item.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_stock_item(conn: &Connection, id: &Uuid) -> Result<Option<StockItem>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, job_id, created_at FROM stock_items WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((id, name, job_id, created_at)) => Ok(Some(StockItem {
            id: parse_uuid(&id)?,
            name,
            job_id: job_id.and_then(|s| Uuid::parse_str(&s).ok()),
            created_at: parse_instant(&created_at)?,
        })),
        None => Ok(None),
    }
}

pub fn list_stock_items(conn: &Connection) -> Result<Vec<StockItem>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, job_id, created_at FROM stock_items ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut items = Vec::new();
    for row in rows {
        let (id, name, job_id, created_at) = row?;
        items.push(StockItem {
            id: parse_uuid(&id)?,
            name,
            job_id: job_id.and_then(|s| Uuid::parse_str(&s).ok()),
            created_at: parse_instant(&created_at)?,
        });
    }
    Ok(items)
}

pub fn delete_stock_item(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM stock_items WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(())
}

// ═══════════════════════════════════════════
// Barcode sets
// ═══════════════════════════════════════════

/// Append a scanned record to the item's barcode set.
///
/// Keys on `(stock_item_id, original_code)` and ignores an exact duplicate,
/// so a concurrent identical scan cannot produce a second row. Returns
/// whether a row was actually inserted.
pub fn append_barcode(
    conn: &Connection,
    item_id: &Uuid,
    record: &PersistedBarcode,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO stock_barcodes (stock_item_id, original_code, year, week,
         production_date, expiry_date, status, months_left, scanned_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            item_id.to_string(),
            record.data.original_code,
            record.data.year,
            record.data.week,
            record.data.production_date.to_string(),
            record.data.expiry_date.to_string(),
            record.data.status.as_str(),
            record.data.months_left,
            record.scanned_at.to_rfc3339(),
        ],
    )?;
    Ok(changed > 0)
}

/// Exact-string membership check against the item's stored set.
pub fn barcode_exists(
    conn: &Connection,
    item_id: &Uuid,
    original_code: &str,
) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM stock_barcodes WHERE stock_item_id = ?1 AND original_code = ?2",
        params![item_id.to_string(), original_code],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Stored records for an item, newest scan first.
pub fn barcodes_for_item(
    conn: &Connection,
    item_id: &Uuid,
) -> Result<Vec<PersistedBarcode>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT original_code, year, week, production_date, expiry_date, status,
         months_left, scanned_at
         FROM stock_barcodes WHERE stock_item_id = ?1 ORDER BY scanned_at DESC",
    )?;

    let rows = stmt.query_map(params![item_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i32>(1)?,
            row.get::<_, u32>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, i32>(6)?,
            row.get::<_, String>(7)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (code, year, week, production, expiry, status, months_left, scanned_at) = row?;
        records.push(PersistedBarcode {
            data: BarcodeData {
                original_code: code,
                year,
                week,
                production_date: parse_date(&production)?,
                expiry_date: parse_date(&expiry)?,
                status: BarcodeStatus::from_str(&status)?,
                months_left,
            },
            scanned_at: parse_instant(&scanned_at)?,
        });
    }
    Ok(records)
}

/// Match-and-remove by original code; returns whether a row was removed.
pub fn remove_barcode(
    conn: &Connection,
    item_id: &Uuid,
    original_code: &str,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM stock_barcodes WHERE stock_item_id = ?1 AND original_code = ?2",
        params![item_id.to_string(), original_code],
    )?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn test_item(conn: &Connection) -> StockItem {
        let item = StockItem {
            id: Uuid::new_v4(),
            name: "Regulator".into(),
            job_id: None,
            created_at: Utc.with_ymd_and_hms(2025, 8, 30, 9, 0, 0).unwrap(),
        };
        insert_stock_item(conn, &item).unwrap();
        item
    }

    fn test_record(code: &str) -> PersistedBarcode {
        PersistedBarcode {
            data: crate::barcode::parse_at(
                code,
                NaiveDate::from_ymd_opt(2025, 8, 30).unwrap(),
            ),
            scanned_at: Utc.with_ymd_and_hms(2025, 8, 30, 9, 15, 0).unwrap(),
        }
    }

    #[test]
    fn stock_item_round_trip() {
        let conn = open_memory_database().unwrap();
        let item = test_item(&conn);
        let fetched = get_stock_item(&conn, &item.id).unwrap().unwrap();
        assert_eq!(fetched, item);
        assert!(get_stock_item(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn barcode_round_trip_preserves_all_fields() {
        let conn = open_memory_database().unwrap();
        let item = test_item(&conn);
        let record = test_record("21253301");

        assert!(append_barcode(&conn, &item.id, &record).unwrap());
        let stored = barcodes_for_item(&conn, &item.id).unwrap();
        assert_eq!(stored, vec![record]);
    }

    #[test]
    fn duplicate_append_is_ignored() {
        let conn = open_memory_database().unwrap();
        let item = test_item(&conn);
        let record = test_record("21253301");

        assert!(append_barcode(&conn, &item.id, &record).unwrap());
        assert!(!append_barcode(&conn, &item.id, &record).unwrap());
        assert_eq!(barcodes_for_item(&conn, &item.id).unwrap().len(), 1);
    }

    #[test]
    fn same_code_allowed_on_different_items() {
        let conn = open_memory_database().unwrap();
        let first = test_item(&conn);
        let second = test_item(&conn);
        let record = test_record("21253301");

        assert!(append_barcode(&conn, &first.id, &record).unwrap());
        assert!(append_barcode(&conn, &second.id, &record).unwrap());
    }

    #[test]
    fn remove_barcode_by_original_code() {
        let conn = open_memory_database().unwrap();
        let item = test_item(&conn);
        append_barcode(&conn, &item.id, &test_record("21253301")).unwrap();

        assert!(remove_barcode(&conn, &item.id, "21253301").unwrap());
        assert!(!remove_barcode(&conn, &item.id, "21253301").unwrap());
        assert!(barcodes_for_item(&conn, &item.id).unwrap().is_empty());
    }

    #[test]
    fn deleting_item_cascades_to_barcodes() {
        let conn = open_memory_database().unwrap();
        let item = test_item(&conn);
        append_barcode(&conn, &item.id, &test_record("21253301")).unwrap();

        delete_stock_item(&conn, &item.id).unwrap();
        let orphans: i64 = conn
            .query_row("SELECT COUNT(*) FROM stock_barcodes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }
}
