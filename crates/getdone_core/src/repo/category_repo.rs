//! Category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist categories together with their owned item collections.
//! - Load categories in insertion order, each with items in insertion order.
//!
//! # Invariants
//! - Deleting a category deletes its items in the same transaction.
//! - Category names are not unique; duplicates are stored as separate rows.

use crate::model::category::{Category, CategoryId};
use crate::model::item::Item;
use crate::repo::item_repo::{insert_item, parse_item_row, ITEM_SELECT_SQL};
use crate::repo::{
    ensure_connection_ready, parse_uuid, with_read_tx, with_write_tx, StoreError, StoreResult,
};
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;

const CATEGORY_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    color_tag,
    created_at
FROM categories";

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Persists a category and any items it already carries.
    fn create_category(&self, category: &Category) -> StoreResult<CategoryId>;
    /// Loads one category with its items.
    fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>>;
    /// Lists all categories in insertion order.
    fn list_categories(&self) -> StoreResult<Vec<Category>>;
    /// Deletes a category and its items, returning how many items went with it.
    fn delete_category(&self, id: CategoryId) -> StoreResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
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

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &Category) -> StoreResult<CategoryId> {
        with_write_tx(self.conn, "category_add", |tx| {
            let sort_order: i64 = tx.query_row(
                "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM categories;",
                [],
                |row| row.get(0),
            )?;
            tx.execute(
                "INSERT INTO categories (
                    uuid,
                    name,
                    color_tag,
                    sort_order,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    category.id.to_string(),
                    category.name.as_str(),
                    category.color_tag.as_str(),
                    sort_order,
                    category.created_at,
                ],
            )?;
            for (index, item) in category.items.iter().enumerate() {
                insert_item(tx, category.id, item, index as i64)?;
            }
            Ok(category.id)
        })
    }

    fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        with_read_tx(self.conn, |tx| {
            let mut category = {
                let mut stmt = tx.prepare(&format!("{CATEGORY_SELECT_SQL} WHERE uuid = ?1;"))?;
                let mut rows = stmt.query([id.to_string()])?;
                let category = match rows.next()? {
                    Some(row) => parse_category_row(row)?,
                    None => return Ok(None),
                };
                category
            };

            let mut stmt = tx.prepare(&format!(
                "{ITEM_SELECT_SQL}
                 WHERE category_uuid = ?1
                 ORDER BY sort_order ASC;"
            ))?;
            let mut rows = stmt.query([id.to_string()])?;
            while let Some(row) = rows.next()? {
                category.items.push(parse_item_row(row)?);
            }
            Ok(Some(category))
        })
    }

    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        with_read_tx(self.conn, |tx| {
            let mut items_by_category = load_items_by_category(tx)?;

            let mut stmt = tx.prepare(&format!(
                "{CATEGORY_SELECT_SQL} ORDER BY sort_order ASC, uuid ASC;"
            ))?;
            let mut rows = stmt.query([])?;
            let mut categories = Vec::new();
            while let Some(row) = rows.next()? {
                let mut category = parse_category_row(row)?;
                category.items = items_by_category.remove(&category.id).unwrap_or_default();
                categories.push(category);
            }
            Ok(categories)
        })
    }

    fn delete_category(&self, id: CategoryId) -> StoreResult<usize> {
        with_write_tx(self.conn, "category_delete", |tx| {
            let removed_items =
                tx.execute("DELETE FROM items WHERE category_uuid = ?1;", [id.to_string()])?;
            let changed = tx.execute("DELETE FROM categories WHERE uuid = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(StoreError::CategoryNotFound(id));
            }
            Ok(removed_items)
        })
    }
}

fn load_items_by_category(conn: &Connection) -> StoreResult<HashMap<CategoryId, Vec<Item>>> {
    let mut stmt = conn.prepare(&format!(
        "{ITEM_SELECT_SQL} ORDER BY category_uuid ASC, sort_order ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut grouped: HashMap<CategoryId, Vec<Item>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let category_text: String = row.get("category_uuid")?;
        let category_id = parse_uuid(&category_text, "items.category_uuid")?;
        grouped
            .entry(category_id)
            .or_default()
            .push(parse_item_row(row)?);
    }
    Ok(grouped)
}

fn parse_category_row(row: &Row<'_>) -> StoreResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "categories.uuid")?;
    Ok(Category::with_id(
        id,
        row.get::<_, String>("name")?,
        row.get::<_, String>("color_tag")?,
        row.get("created_at")?,
    ))
}
