//! Repository layer: category/item persistence over SQLite.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Keep SQL, row mapping and transaction handling inside this boundary.
//!
//! # Invariants
//! - Every mutation runs inside one IMMEDIATE transaction; a failed step
//!   rolls back the whole operation.
//! - Write failures surface as `StoreError::Write`, missing targets as
//!   `CategoryNotFound` / `ItemNotFound`, never as silent no-ops.
//! - Repositories perform no input validation.

pub mod category_repo;
mod guard;
pub mod item_repo;

pub(crate) use guard::ensure_connection_ready;

use crate::db::DbError;
use crate::model::category::CategoryId;
use crate::model::item::ItemId;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store reads, writes and connection readiness checks.
#[derive(Debug)]
pub enum StoreError {
    /// Read path or bootstrap failure.
    Db(DbError),
    /// A write transaction failed to commit; nothing was applied.
    Write {
        operation: &'static str,
        source: DbError,
    },
    /// Target category does not exist (never created or already deleted).
    CategoryNotFound(CategoryId),
    /// Target item does not exist (never created or already deleted).
    ItemNotFound(ItemId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl StoreError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "store_read_failed",
            Self::Write { .. } => "store_write_failed",
            Self::CategoryNotFound(_) => "category_not_found",
            Self::ItemNotFound(_) => "item_not_found",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_required_table",
            Self::MissingRequiredColumn { .. } => "missing_required_column",
            Self::InvalidData(_) => "invalid_data",
        }
    }

    /// Whether the error only reports a stale or unknown record reference.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CategoryNotFound(_) | Self::ItemNotFound(_))
    }

    fn into_write(self, operation: &'static str) -> Self {
        match self {
            Self::Db(source) => Self::Write { operation, source },
            other => other,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Write { operation, source } => {
                write!(f, "{operation} failed and was rolled back: {source}")
            }
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "store requires column `{column}` in table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Runs `work` inside an IMMEDIATE transaction and commits it.
///
/// Any error drops the transaction (rollback) and database failures are
/// reported as `StoreError::Write` tagged with `operation`.
pub(crate) fn with_write_tx<T>(
    conn: &Connection,
    operation: &'static str,
    work: impl FnOnce(&Transaction<'_>) -> StoreResult<T>,
) -> StoreResult<T> {
    let run = || -> StoreResult<T> {
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        let value = work(&tx)?;
        tx.commit()?;
        Ok(value)
    };
    run().map_err(|err| err.into_write(operation))
}

/// Runs multi-statement reads inside one DEFERRED transaction so they share
/// a single committed snapshot.
pub(crate) fn with_read_tx<T>(
    conn: &Connection,
    work: impl FnOnce(&Transaction<'_>) -> StoreResult<T>,
) -> StoreResult<T> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Deferred)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
