//! Item record.

use crate::model::now_epoch_ms;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an item.
pub type ItemId = Uuid;

/// Single to-do entry.
///
/// The owning category is not stored on the record; ownership is expressed
/// by containment in [`Category::items`](crate::model::category::Category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Unix epoch milliseconds, fixed at creation.
    pub created_at: i64,
    pub done: bool,
}

impl Item {
    /// Creates a not-done item stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, now_epoch_ms())
    }

    /// Creates a not-done item with caller-provided identity and timestamp.
    pub fn with_id(id: ItemId, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            created_at,
            done: false,
        }
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_done(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }
}
