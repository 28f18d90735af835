//! Category record.
//!
//! # Invariants
//! - `id` is stable and never reused for another category.
//! - `items` is kept in insertion order; display order is derived at read time.

use crate::model::item::Item;
use crate::model::now_epoch_ms;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a category.
pub type CategoryId = Uuid;

/// Named grouping that owns zero or more items and carries a color tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// User label. Duplicates across categories are allowed.
    pub name: String,
    /// Six hex digits, no leading `#`. Only meaningful to presentation layers.
    pub color_tag: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Owned items in insertion order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    /// Creates an empty category with a generated ID and the current time.
    pub fn new(name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, color_tag, now_epoch_ms())
    }

    /// Creates an empty category with caller-provided identity and timestamp.
    ///
    /// Used when rehydrating rows from storage.
    pub fn with_id(
        id: CategoryId,
        name: impl Into<String>,
        color_tag: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color_tag: color_tag.into(),
            created_at,
            items: Vec::new(),
        }
    }

    /// Number of items not yet marked done.
    pub fn open_item_count(&self) -> usize {
        self.items.iter().filter(|item| !item.done).count()
    }
}
