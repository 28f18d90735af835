//! Core domain logic for GetDone.
//! This crate is the single source of truth for category/item invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId};
pub use model::item::{Item, ItemId};
pub use model::palette::{random_color_tag, DEFAULT_ACCENT};
pub use model::validation::ValidationError;
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::item_repo::{ItemListQuery, ItemRepository, SqliteItemRepository};
pub use repo::{StoreError, StoreResult};
pub use service::todo_service::{TodoService, TodoServiceError, TodoServiceResult};
pub use store::{SqliteStore, TodoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
