//! To-do use-case service.
//!
//! # Responsibility
//! - Validate caller input before it reaches the store.
//! - Assign a palette color to new categories when none is given.
//! - Translate store not-found errors into use-case errors.
//!
//! # Invariants
//! - Blank names/titles never reach storage.
//! - Service APIs never bypass the `TodoStore` contract.

use crate::model::category::{Category, CategoryId};
use crate::model::item::{Item, ItemId};
use crate::model::palette::random_color_tag;
use crate::model::validation::{
    normalize_color_tag, validate_category_name, validate_item_title, ValidationError,
};
use crate::repo::StoreError;
use crate::store::TodoStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from to-do service operations.
#[derive(Debug)]
pub enum TodoServiceError {
    /// Caller input was rejected before touching storage.
    Validation(ValidationError),
    /// Target category does not exist.
    CategoryNotFound(CategoryId),
    /// Target item does not exist.
    ItemNotFound(ItemId),
    /// Store-level failure.
    Store(StoreError),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for TodoServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for TodoServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::CategoryNotFound(id) => Self::CategoryNotFound(id),
            StoreError::ItemNotFound(id) => Self::ItemNotFound(id),
            other => Self::Store(other),
        }
    }
}

pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Service facade over a `TodoStore` implementation.
pub struct TodoService<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    /// Creates a service using the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a category.
    ///
    /// # Contract
    /// - `name` must contain a non-whitespace character; it is stored as given.
    /// - `color_tag` accepts `RRGGBB` or `#RRGGBB`; `None` picks a random
    ///   palette color.
    pub fn create_category(
        &self,
        name: &str,
        color_tag: Option<&str>,
    ) -> TodoServiceResult<Category> {
        validate_category_name(name)?;
        let color_tag = match color_tag {
            Some(value) => normalize_color_tag(value)?,
            None => random_color_tag().to_string(),
        };
        Ok(self.store.add_category(name, &color_tag)?)
    }

    /// Lists all categories in insertion order.
    pub fn list_categories(&self) -> TodoServiceResult<Vec<Category>> {
        Ok(self.store.query_all_categories()?)
    }

    /// Loads one category or reports it missing.
    pub fn category(&self, id: CategoryId) -> TodoServiceResult<Category> {
        self.store
            .get_category(id)?
            .ok_or(TodoServiceError::CategoryNotFound(id))
    }

    /// Deletes a category and every item it owns.
    pub fn delete_category(&self, id: CategoryId) -> TodoServiceResult<()> {
        Ok(self.store.delete_category(id)?)
    }

    /// Adds an item to a category.
    ///
    /// # Contract
    /// - `title` must contain a non-whitespace character; it is stored as given.
    /// - The new item is not done and stamped with the current time.
    pub fn create_item(&self, category_id: CategoryId, title: &str) -> TodoServiceResult<Item> {
        validate_item_title(title)?;
        Ok(self.store.add_item(category_id, title)?)
    }

    /// Lists a category's items sorted by title.
    ///
    /// An empty `search` behaves like no search at all.
    pub fn list_items(
        &self,
        category_id: CategoryId,
        search: Option<&str>,
    ) -> TodoServiceResult<Vec<Item>> {
        let search = search.filter(|needle| !needle.is_empty());
        Ok(self.store.query_items(category_id, search)?)
    }

    /// Flips the done flag of one item.
    pub fn toggle_item(&self, id: ItemId) -> TodoServiceResult<Item> {
        Ok(self.store.toggle_item_done(id)?)
    }

    /// Deletes one item.
    pub fn delete_item(&self, id: ItemId) -> TodoServiceResult<()> {
        Ok(self.store.delete_item(id)?)
    }
}
