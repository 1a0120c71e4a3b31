//! Tree fruit.
//!
//! Palms only carry coconuts and other trees never do. Fruit data that breaks
//! this, or whose glyph and position lists disagree in length, is regenerated.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

use super::item::{PercentPoint, TreeData};

pub const PALM_FRUIT: &str = "🥥";
pub const GENERAL_FRUITS: &[&str] = &["🍎", "🍋", "🍊", "🍑", "🍐", "🍅", "🍒", "🍇", "🥭", "🍓"];
pub const PALM_FRUITS: &[&str] = &[PALM_FRUIT];

pub const FRUIT_COUNT: RangeInclusive<usize> = 3..=5;
/// Interior of the tree tile, in percent.
pub const FRUIT_LEFT: RangeInclusive<f64> = 15.0..=85.0;
pub const FRUIT_TOP: RangeInclusive<f64> = 10.0..=65.0;

pub fn fruit_pool(palm: bool) -> &'static [&'static str] {
    if palm {
        PALM_FRUITS
    } else {
        GENERAL_FRUITS
    }
}

pub fn needs_regeneration(tree: &TreeData, palm: bool) -> bool {
    if tree.fruits.is_empty() || tree.fruits.len() != tree.fruit_positions.len() {
        return true;
    }
    if palm {
        tree.fruits.iter().any(|f| f != PALM_FRUIT)
    } else {
        tree.fruits.iter().any(|f| f == PALM_FRUIT)
    }
}

pub fn regenerate<R: Rng + ?Sized>(tree: &mut TreeData, palm: bool, rng: &mut R) {
    let pool = fruit_pool(palm);
    let count = rng.gen_range(FRUIT_COUNT);
    tree.fruits = (0..count)
        .filter_map(|_| pool.choose(&mut *rng).map(|f| (*f).to_string()))
        .collect();
    tree.fruit_positions = (0..tree.fruits.len())
        .map(|_| PercentPoint {
            left: rng.gen_range(FRUIT_LEFT),
            top: rng.gen_range(FRUIT_TOP),
        })
        .collect();
}

/// Regenerate if needed. Returns true when the fruit changed.
pub fn repair<R: Rng + ?Sized>(tree: &mut TreeData, palm: bool, rng: &mut R) -> bool {
    if !needs_regeneration(tree, palm) {
        return false;
    }
    regenerate(tree, palm, rng);
    true
}
