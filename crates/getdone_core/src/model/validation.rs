//! Caller-side input validation.
//!
//! # Responsibility
//! - Reject blank category names and item titles before they reach storage.
//! - Normalize user supplied color tags to the stored `RRGGBB` form.
//!
//! # Invariants
//! - Validation never alters names or titles; accepted text is stored as typed.
//! - Storage itself performs none of these checks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static COLOR_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("valid color tag regex"));

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Category name is empty or whitespace-only.
    BlankCategoryName,
    /// Item title is empty or whitespace-only.
    BlankItemTitle,
    /// Color tag is not six hex digits.
    InvalidColorTag(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCategoryName => write!(f, "category name must not be blank"),
            Self::BlankItemTitle => write!(f, "item title must not be blank"),
            Self::InvalidColorTag(value) => {
                write!(f, "color tag must be six hex digits, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Accepts any name with at least one non-whitespace character.
pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankCategoryName);
    }
    Ok(())
}

/// Accepts any title with at least one non-whitespace character.
pub fn validate_item_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::BlankItemTitle);
    }
    Ok(())
}

/// Normalizes `#rrggbb` / `rrggbb` input to upper-case `RRGGBB`.
pub fn normalize_color_tag(value: &str) -> Result<String, ValidationError> {
    COLOR_TAG_RE
        .captures(value.trim())
        .and_then(|caps| caps.get(1))
        .map(|hex| hex.as_str().to_ascii_uppercase())
        .ok_or_else(|| ValidationError::InvalidColorTag(value.to_string()))
}
