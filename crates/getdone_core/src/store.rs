//! Store handle: the persistence façade used by callers.
//!
//! # Responsibility
//! - Own the SQLite connection for the lifetime of the application.
//! - Expose the category/item operation contract behind `TodoStore`.
//! - Emit one metadata-only log event per operation.
//!
//! # Invariants
//! - All operations are serialized through one mutex; reads never observe an
//!   in-flight write.
//! - Results are snapshots; callers re-query after mutations.
//! - The store performs no input validation.

use crate::db::{open_db, open_db_in_memory};
use crate::model::category::{Category, CategoryId};
use crate::model::item::{Item, ItemId};
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::ensure_connection_ready;
use crate::repo::item_repo::{ItemListQuery, ItemRepository, SqliteItemRepository};
use crate::repo::{StoreError, StoreResult};
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Category/item persistence contract.
pub trait TodoStore {
    /// Persists a new category with a fresh identity.
    fn add_category(&self, name: &str, color_tag: &str) -> StoreResult<Category>;
    /// Returns every category in insertion order, items included.
    fn query_all_categories(&self) -> StoreResult<Vec<Category>>;
    /// Loads one category, items included.
    fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>>;
    /// Removes a category together with its items.
    fn delete_category(&self, id: CategoryId) -> StoreResult<()>;
    /// Creates a not-done item stamped with the current time and appends it
    /// to the category.
    fn add_item(&self, category_id: CategoryId, title: &str) -> StoreResult<Item>;
    /// Loads one item.
    fn get_item(&self, id: ItemId) -> StoreResult<Option<Item>>;
    /// Flips `done` and returns the updated item.
    fn toggle_item_done(&self, id: ItemId) -> StoreResult<Item>;
    /// Removes one item.
    fn delete_item(&self, id: ItemId) -> StoreResult<()>;
    /// Returns the category's items sorted by title, optionally filtered by a
    /// case-insensitive title substring.
    fn query_items(
        &self,
        category_id: CategoryId,
        title_contains: Option<&str>,
    ) -> StoreResult<Vec<Item>>;
}

impl<T: TodoStore + ?Sized> TodoStore for &T {
    fn add_category(&self, name: &str, color_tag: &str) -> StoreResult<Category> {
        (**self).add_category(name, color_tag)
    }

    fn query_all_categories(&self) -> StoreResult<Vec<Category>> {
        (**self).query_all_categories()
    }

    fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        (**self).get_category(id)
    }

    fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        (**self).delete_category(id)
    }

    fn add_item(&self, category_id: CategoryId, title: &str) -> StoreResult<Item> {
        (**self).add_item(category_id, title)
    }

    fn get_item(&self, id: ItemId) -> StoreResult<Option<Item>> {
        (**self).get_item(id)
    }

    fn toggle_item_done(&self, id: ItemId) -> StoreResult<Item> {
        (**self).toggle_item_done(id)
    }

    fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        (**self).delete_item(id)
    }

    fn query_items(
        &self,
        category_id: CategoryId,
        title_contains: Option<&str>,
    ) -> StoreResult<Vec<Item>> {
        (**self).query_items(category_id, title_contains)
    }
}

/// SQLite-backed store owning a single connection.
///
/// Open it once at startup, share it by reference, and `close` it on
/// shutdown. The connection is schema-checked once on construction;
/// repositories built per operation skip the check.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) and migrates the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` / `MissingRequired*` when the connection
    ///   was not bootstrapped through `db::open_*`.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Closes the underlying connection, flushing SQLite state.
    pub fn close(self) -> StoreResult<()> {
        let conn = self.conn.into_inner().unwrap_or_else(PoisonError::into_inner);
        conn.close().map_err(|(_, err)| StoreError::from(err))?;
        info!("event=store_close module=store status=ok");
        Ok(())
    }

    fn run<T>(
        &self,
        operation: &'static str,
        work: impl FnOnce(&Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let started_at = Instant::now();
        // Poisoning is recoverable: an interrupted transaction rolled back on drop.
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let result = work(&conn);
        drop(conn);

        let duration_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(_) if operation.starts_with("query") || operation.starts_with("get") => debug!(
                "event={operation} module=store status=ok duration_ms={duration_ms}"
            ),
            Ok(_) => info!("event={operation} module=store status=ok duration_ms={duration_ms}"),
            Err(err) if err.is_not_found() => warn!(
                "event={operation} module=store status=error duration_ms={duration_ms} error_code={}",
                err.code()
            ),
            Err(err) => error!(
                "event={operation} module=store status=error duration_ms={duration_ms} error_code={} error={}",
                err.code(),
                err
            ),
        }
        result
    }
}

impl TodoStore for SqliteStore {
    fn add_category(&self, name: &str, color_tag: &str) -> StoreResult<Category> {
        self.run("category_add", |conn| {
            let category = Category::new(name, color_tag);
            SqliteCategoryRepository::new(conn).create_category(&category)?;
            Ok(category)
        })
    }

    fn query_all_categories(&self) -> StoreResult<Vec<Category>> {
        self.run("query_categories", |conn| {
            SqliteCategoryRepository::new(conn).list_categories()
        })
    }

    fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        self.run("get_category", |conn| {
            SqliteCategoryRepository::new(conn).get_category(id)
        })
    }

    fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        self.run("category_delete", |conn| {
            let removed_items = SqliteCategoryRepository::new(conn).delete_category(id)?;
            debug!("event=category_cascade module=store status=ok removed_items={removed_items}");
            Ok(())
        })
    }

    fn add_item(&self, category_id: CategoryId, title: &str) -> StoreResult<Item> {
        self.run("item_add", |conn| {
            let item = Item::new(title);
            SqliteItemRepository::new(conn).create_item(category_id, &item)?;
            Ok(item)
        })
    }

    fn get_item(&self, id: ItemId) -> StoreResult<Option<Item>> {
        self.run("get_item", |conn| SqliteItemRepository::new(conn).get_item(id))
    }

    fn toggle_item_done(&self, id: ItemId) -> StoreResult<Item> {
        self.run("item_toggle_done", |conn| {
            SqliteItemRepository::new(conn).toggle_item_done(id)
        })
    }

    fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        self.run("item_delete", |conn| {
            SqliteItemRepository::new(conn).delete_item(id)
        })
    }

    fn query_items(
        &self,
        category_id: CategoryId,
        title_contains: Option<&str>,
    ) -> StoreResult<Vec<Item>> {
        self.run("query_items", |conn| {
            let mut query = ItemListQuery::for_category(category_id);
            if let Some(needle) = title_contains {
                query = query.matching(needle);
            }
            SqliteItemRepository::new(conn).list_items(&query)
        })
    }
}
