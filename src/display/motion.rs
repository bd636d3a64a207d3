// src/display/motion.rs

//! The per-tick motion model: text scrolls right to left and expires once it
//! has left the canvas, the geo cursor eases toward the latest target.

use crate::core::{Canvas, Coordinates, DisplayItem};
use std::f64::consts::PI;

/// Upper bound on the distance an item moves in one tick.
pub const MAX_STEP: f32 = 20.0;

/// Approximate glyph width as a fraction of glyph height.
pub const GLYPH_ASPECT: f32 = 0.5;

/// Fraction of the remaining distance the geo cursor covers per tick.
pub const EASING: f64 = 0.1;

/// Horizontal distance an item of the given width travels in one tick.
/// Wider items move faster, scaled down by decades once past `MAX_STEP`.
pub fn scroll_step(width: f32) -> f32 {
    let mut dx = 0.1 + width / 64.0;
    if !dx.is_finite() {
        return MAX_STEP;
    }
    while dx > MAX_STEP {
        dx /= 10.0;
    }
    dx
}

/// Width a headless presenter assigns to an item in place of a rendered surface.
pub fn estimate_width(item: &DisplayItem) -> f32 {
    item.text.chars().count() as f32 * item.size as f32 * GLYPH_ASPECT
}

/// Moves every item one step left and drops those fully off-canvas.
/// Returns how many items expired.
pub fn advance_items(items: &mut Vec<DisplayItem>) -> usize {
    for item in items.iter_mut() {
        item.x -= scroll_step(item.width);
    }
    let before = items.len();
    items.retain(|item| item.x > -item.width);
    before - items.len()
}

/// The position actually shown for a geo feed, trailing the target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoTracker {
    current: Coordinates,
}

impl GeoTracker {
    pub fn current(&self) -> Coordinates {
        self.current
    }

    /// Moves the shown position a fixed fraction of the way to `target`.
    pub fn step(&mut self, target: Coordinates) -> Coordinates {
        self.current = Coordinates {
            lat: self.current.lat * (1.0 - EASING) + target.lat * EASING,
            lon: self.current.lon * (1.0 - EASING) + target.lon * EASING,
        };
        self.current
    }

    /// True once the shown position is within one degree of `target`.
    pub fn is_locked(&self, target: Coordinates) -> bool {
        let d_lat = self.current.lat - target.lat;
        let d_lon = self.current.lon - target.lon;
        d_lat * d_lat + d_lon * d_lon < 1.0
    }
}

/// Projects a position onto the canvas (equirectangular x, Mercator y).
pub fn project(position: Coordinates, canvas: Canvas) -> (f64, f64) {
    let width = f64::from(canvas.width);
    let height = f64::from(canvas.height);
    let x = (position.lon + 180.0) / 360.0 * width;
    let y = height / 2.0 + height / 1.7 / PI * (PI / 4.0 + position.lat / 180.0 * PI / 2.0).tan().ln();
    (x, y)
}
