//! Item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create, toggle and delete items inside their owning category.
//! - Serve the title-sorted, optionally filtered item view.
//!
//! # Invariants
//! - An item is inserted only if its category exists, in the same transaction
//!   that allocates its insertion slot.
//! - List order is `title ASC` (byte-wise), ties by insertion order.
//! - Title filtering is a read-time view and never touches stored order.

use crate::model::category::CategoryId;
use crate::model::item::{Item, ItemId};
use crate::repo::{
    bool_to_int, ensure_connection_ready, parse_uuid, with_read_tx, with_write_tx, StoreError,
    StoreResult,
};
use rusqlite::{params, Connection, Row};

pub(crate) const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    category_uuid,
    title,
    done,
    sort_order,
    created_at
FROM items";

/// Query options for listing one category's items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListQuery {
    pub category_id: CategoryId,
    /// Case-insensitive substring filter on `title`. `None` lists everything.
    pub title_contains: Option<String>,
}

impl ItemListQuery {
    /// Lists every item of `category_id`.
    pub fn for_category(category_id: CategoryId) -> Self {
        Self {
            category_id,
            title_contains: None,
        }
    }

    /// Restricts the listing to titles containing `needle`.
    pub fn matching(mut self, needle: impl Into<String>) -> Self {
        self.title_contains = Some(needle.into());
        self
    }
}

/// Repository interface for item operations.
pub trait ItemRepository {
    /// Appends `item` to the category's collection.
    fn create_item(&self, category_id: CategoryId, item: &Item) -> StoreResult<ItemId>;
    /// Loads one item by id.
    fn get_item(&self, id: ItemId) -> StoreResult<Option<Item>>;
    /// Lists a category's items sorted by title.
    fn list_items(&self, query: &ItemListQuery) -> StoreResult<Vec<Item>>;
    /// Flips `done` and returns the updated item.
    fn toggle_item_done(&self, id: ItemId) -> StoreResult<Item>;
    /// Removes one item, detaching it from its category.
    fn delete_item(&self, id: ItemId) -> StoreResult<()>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self::new(conn))
    }

    /// Wraps a connection that already passed `ensure_connection_ready`.
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, category_id: CategoryId, item: &Item) -> StoreResult<ItemId> {
        with_write_tx(self.conn, "item_add", |tx| {
            if !category_exists(tx, category_id)? {
                return Err(StoreError::CategoryNotFound(category_id));
            }
            let sort_order = next_item_sort_order(tx, category_id)?;
            insert_item(tx, category_id, item, sort_order)?;
            Ok(item.id)
        })
    }

    fn get_item(&self, id: ItemId) -> StoreResult<Option<Item>> {
        load_item(self.conn, id)
    }

    fn list_items(&self, query: &ItemListQuery) -> StoreResult<Vec<Item>> {
        let needle = query.title_contains.as_deref();

        with_read_tx(self.conn, |tx| {
            if !category_exists(tx, query.category_id)? {
                return Err(StoreError::CategoryNotFound(query.category_id));
            }

            let mut stmt = tx.prepare(&format!(
                "{ITEM_SELECT_SQL}
                 WHERE category_uuid = ?1
                 ORDER BY title ASC, sort_order ASC;"
            ))?;
            let mut rows = stmt.query([query.category_id.to_string()])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                let item = parse_item_row(row)?;
                if needle.map_or(true, |needle| title_matches(&item.title, needle)) {
                    items.push(item);
                }
            }
            Ok(items)
        })
    }

    fn toggle_item_done(&self, id: ItemId) -> StoreResult<Item> {
        with_write_tx(self.conn, "item_toggle_done", |tx| {
            let mut item = load_item(tx, id)?.ok_or(StoreError::ItemNotFound(id))?;
            item.toggle_done();
            tx.execute(
                "UPDATE items SET done = ?2 WHERE uuid = ?1;",
                params![id.to_string(), bool_to_int(item.done)],
            )?;
            Ok(item)
        })
    }

    fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        with_write_tx(self.conn, "item_delete", |tx| {
            let changed = tx.execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(StoreError::ItemNotFound(id));
            }
            Ok(())
        })
    }
}

/// Case-insensitive substring test used by item search.
///
/// An empty needle matches every title.
pub fn title_matches(title: &str, needle: &str) -> bool {
    fold_case(title).contains(&fold_case(needle))
}

/// Folds every char on its own, so a letter folds the same wherever it sits
/// (`str::to_lowercase` maps a word-final `Σ` to `ς`).
fn fold_case(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
        .collect()
}

pub(crate) fn insert_item(
    conn: &Connection,
    category_id: CategoryId,
    item: &Item,
    sort_order: i64,
) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO items (
            uuid,
            category_uuid,
            title,
            done,
            sort_order,
            created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            item.id.to_string(),
            category_id.to_string(),
            item.title.as_str(),
            bool_to_int(item.done),
            sort_order,
            item.created_at,
        ],
    )?;
    Ok(())
}

pub(crate) fn parse_item_row(row: &Row<'_>) -> StoreResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "items.uuid")?;

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid done value `{other}` in items.done"
            )));
        }
    };

    let mut item = Item::with_id(id, row.get::<_, String>("title")?, row.get("created_at")?);
    item.done = done;
    Ok(item)
}

pub(crate) fn category_exists(conn: &Connection, category_id: CategoryId) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE uuid = ?1);",
        [category_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn load_item(conn: &Connection, id: ItemId) -> StoreResult<Option<Item>> {
    let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_item_row(row)?));
    }
    Ok(None)
}

fn next_item_sort_order(conn: &Connection, category_id: CategoryId) -> StoreResult<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(sort_order), -1) + 1
         FROM items
         WHERE category_uuid = ?1;",
        [category_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::title_matches;

    #[test]
    fn title_matches_ignores_case() {
        assert!(title_matches("Call bank", "call"));
        assert!(title_matches("Call bank", "BANK"));
        assert!(!title_matches("Buy milk", "call"));
    }

    #[test]
    fn title_matches_folds_non_ascii_case() {
        assert!(title_matches("Überweisung prüfen", "überweisung"));
    }

    #[test]
    fn title_matches_is_independent_of_letter_position() {
        assert!(title_matches("ΟΔΟΣ", "Σ"));
        assert!(title_matches("οδος", "Σ"));
        assert!(title_matches("Straße", "STRASSE"));
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(title_matches("anything", ""));
        assert!(title_matches("", ""));
    }
}
