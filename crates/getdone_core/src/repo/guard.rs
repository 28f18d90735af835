//! Schema readiness checks for connections handed to the store.

use super::{StoreError, StoreResult};
use crate::db::migrations::latest_version;
use rusqlite::Connection;

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "categories",
        &["uuid", "name", "color_tag", "sort_order", "created_at"],
    ),
    (
        "items",
        &[
            "uuid",
            "category_uuid",
            "title",
            "done",
            "sort_order",
            "created_at",
        ],
    ),
];

/// Rejects connections that were not bootstrapped through `db::open_*`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for (table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(*table));
        }
        for column in *columns {
            if !table_has_column(conn, table, column)? {
                return Err(StoreError::MissingRequiredColumn {
                    table: *table,
                    column: *column,
                });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
