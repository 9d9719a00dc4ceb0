use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{parse_instant, parse_uuid};
use crate::db::DatabaseError;
use crate::models::RoutineTask;

pub fn insert_task(conn: &Connection, task: &RoutineTask) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO routine_tasks (id, title, address, contact_name, contact_phone,
         notes, done, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            task.id.to_string(),
            task.title,
            task.address,
            task.contact_name,
            task.contact_phone,
            task.notes,
            task.done as i32,
            task.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_task(conn: &Connection, id: &Uuid) -> Result<Option<RoutineTask>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, title, address, contact_name, contact_phone, notes, done, created_at
             FROM routine_tasks WHERE id = ?1",
            params![id.to_string()],
            |row| Ok(task_row(row)),
        )
        .optional()?;

    match row {
        Some(row) => Ok(Some(task_from_row(row?)?)),
        None => Ok(None),
    }
}

/// Open tasks only by default; the pool view shows completed ones on demand.
pub fn list_tasks(conn: &Connection, include_done: bool) -> Result<Vec<RoutineTask>, DatabaseError> {
    let sql = if include_done {
        "SELECT id, title, address, contact_name, contact_phone, notes, done, created_at
         FROM routine_tasks ORDER BY created_at DESC"
    } else {
        "SELECT id, title, address, contact_name, contact_phone, notes, done, created_at
         FROM routine_tasks WHERE done = 0 ORDER BY created_at DESC"
    };
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt.query_map([], |row| Ok(task_row(row)))?;

    let mut tasks = Vec::new();
    for row in rows {
        tasks.push(task_from_row(row??)?);
    }
    Ok(tasks)
}

pub fn set_task_done(conn: &Connection, id: &Uuid, done: bool) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE routine_tasks SET done = ?2 WHERE id = ?1",
        params![id.to_string(), done as i32],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "routine_task".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_task(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM routine_tasks WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(())
}

// Internal row type for RoutineTask mapping
struct TaskRow {
    id: String,
    title: String,
    address: Option<String>,
    contact_name: Option<String>,
    contact_phone: Option<String>,
    notes: Option<String>,
    done: i32,
    created_at: String,
}

fn task_row(row: &rusqlite::Row<'_>) -> Result<TaskRow, rusqlite::Error> {
    Ok(TaskRow {
        id: row.get(0)?,
        title: row.get(1)?,
        address: row.get(2)?,
        contact_name: row.get(3)?,
        contact_phone: row.get(4)?,
        notes: row.get(5)?,
        done: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn task_from_row(row: TaskRow) -> Result<RoutineTask, DatabaseError> {
    Ok(RoutineTask {
        id: parse_uuid(&row.id)?,
        title: row.title,
        address: row.address,
        contact_name: row.contact_name,
        contact_phone: row.contact_phone,
        notes: row.notes,
        done: row.done != 0,
        created_at: parse_instant(&row.created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use chrono::{TimeZone, Utc};

    fn test_task(title: &str) -> RoutineTask {
        RoutineTask {
            id: Uuid::new_v4(),
            title: title.into(),
            address: Some("Çankaya, Tunalı Hilmi Cad. 45".into()),
            contact_name: Some("Mehmet".into()),
            contact_phone: Some("+90 533 111 11 11".into()),
            notes: None,
            done: false,
            created_at: Utc.with_ymd_and_hms(2025, 8, 30, 7, 30, 0).unwrap(),
        }
    }

    #[test]
    fn task_round_trip() {
        let conn = open_memory_database().unwrap();
        let task = test_task("Check chimney draft");
        insert_task(&conn, &task).unwrap();

        let fetched = get_task(&conn, &task.id).unwrap().unwrap();
        assert_eq!(fetched, task);
    }

    #[test]
    fn completed_tasks_hidden_by_default() {
        let conn = open_memory_database().unwrap();
        let open = test_task("Open");
        let done = test_task("Done");
        insert_task(&conn, &open).unwrap();
        insert_task(&conn, &done).unwrap();
        set_task_done(&conn, &done.id, true).unwrap();

        let pool = list_tasks(&conn, false).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, open.id);
        assert_eq!(list_tasks(&conn, true).unwrap().len(), 2);
    }

    #[test]
    fn reopen_returns_task_to_pool() {
        let conn = open_memory_database().unwrap();
        let task = test_task("Valve");
        insert_task(&conn, &task).unwrap();
        set_task_done(&conn, &task.id, true).unwrap();
        set_task_done(&conn, &task.id, false).unwrap();

        assert_eq!(list_tasks(&conn, false).unwrap().len(), 1);
    }

    #[test]
    fn set_done_on_missing_task_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = set_task_done(&conn, &Uuid::new_v4(), true).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
