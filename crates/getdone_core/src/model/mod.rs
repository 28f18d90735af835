//! Category/item domain model.
//!
//! # Responsibility
//! - Define the two persistent record shapes and their composition.
//! - Provide caller-side validation and color tag assignment helpers.
//!
//! # Invariants
//! - Every record is identified by a UUID v4 that is never reused.
//! - An item belongs to exactly one category.
//! - Structural types do not validate text; validation is a caller concern.

pub mod category;
pub mod item;
pub mod palette;
pub mod validation;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
