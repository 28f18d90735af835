//! Flat color palette for newly created categories.
//!
//! Categories get a random entry from this palette unless the caller picks
//! a color explicitly.

use rand::seq::IndexedRandom;

/// Accent used by the category list itself.
pub const DEFAULT_ACCENT: &str = "E8C413";

const FLAT_PALETTE: &[&str] = &[
    "1ABC9C", "16A085", "2ECC71", "27AE60", "3498DB", "2980B9", "9B59B6", "8E44AD", "34495E",
    "2C3E50", "F1C40F", "F39C12", "E67E22", "D35400", "E74C3C", "C0392B", "ECF0F1", "BDC3C7",
    "95A5A6", "7F8C8D",
];

/// All colors a category may be assigned at random.
pub fn palette() -> &'static [&'static str] {
    FLAT_PALETTE
}

/// Picks a uniformly random palette color.
pub fn random_color_tag() -> &'static str {
    FLAT_PALETTE
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(DEFAULT_ACCENT)
}

#[cfg(test)]
mod tests {
    use super::{palette, random_color_tag, DEFAULT_ACCENT};
    use crate::model::validation::normalize_color_tag;

    #[test]
    fn every_palette_entry_is_a_normalized_color_tag() {
        for color in palette().iter().chain([&DEFAULT_ACCENT]) {
            assert_eq!(normalize_color_tag(color).unwrap(), *color);
        }
    }

    #[test]
    fn palette_has_no_duplicates() {
        let mut colors = palette().to_vec();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), palette().len());
    }

    #[test]
    fn random_color_tag_comes_from_palette() {
        for _ in 0..32 {
            assert!(palette().contains(&random_color_tag()));
        }
    }
}
