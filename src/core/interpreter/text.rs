// src/core/interpreter/text.rs

//! The text interpreter: each record becomes a scrolling line whose size and
//! color are drawn at random.

use crate::core::feed::{Canvas, DisplayItem, Rgb};
use rand::Rng;
use std::ops::RangeInclusive;

/// Smallest glyph height an item can get.
pub const MIN_ITEM_SIZE: u32 = 4;

/// Picks the exclusive upper bound for the random part of an item's size.
///
/// The more items are on screen, the smaller the common case becomes, with an
/// occasional large item so busy feeds still show some headline text.
pub fn size_ceiling<R: Rng>(live: usize, rng: &mut R) -> u32 {
    let (common, rare, one_in) = match live {
        0..20 => return 28,
        20..25 => (24, 28, 10),
        25..30 => (20, 28, 15),
        30..50 => (16, 24, 20),
        50..80 => (12, 24, 40),
        80..110 => (8, 24, 50),
        110..200 => (4, 24, 100),
        _ => (1, 24, u32::try_from(live).unwrap_or(u32::MAX)),
    };

    if rng.gen_ratio(1, one_in) { rare } else { common }
}

/// The sizes an item can possibly receive while `live` items are on screen.
pub fn size_bounds(live: usize) -> RangeInclusive<u32> {
    let largest_ceiling = if live < 30 { 28 } else { 24 };
    MIN_ITEM_SIZE..=largest_ceiling + MIN_ITEM_SIZE - 1
}

/// Builds a new item entering from the right edge of the canvas.
pub fn spawn_item<R: Rng>(text: &str, live: usize, canvas: Canvas, rng: &mut R) -> DisplayItem {
    let ceiling = size_ceiling(live, rng);
    let size = rng.gen_range(0..ceiling) + MIN_ITEM_SIZE;

    // Bigger text is brighter.
    let green = 64 + 191 * i64::from(size) / 32 - rng.gen_range(0..32i64);
    let color = Rgb {
        r: 0,
        g: green.clamp(0, 255) as u8,
        b: 0,
    };

    let y = if canvas.height == 0 {
        0.0
    } else {
        rng.gen_range(0..canvas.height) as f32
    };

    DisplayItem {
        text: text.to_string(),
        size,
        color,
        x: canvas.width as f32,
        y,
        width: canvas.width as f32 * 2.0,
        measured: false,
    }
}
