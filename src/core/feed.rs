// src/core/feed.rs

//! The published downstream state: everything the interpreters write and the
//! presentation layer reads once per tick.

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Pixel dimensions of the surface the presentation layer draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A line of text travelling across the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub text: String,
    /// Glyph height in pixels.
    pub size: u32,
    pub color: Rgb,
    pub x: f32,
    pub y: f32,
    /// Horizontal extent. Starts as a placeholder until the presenter measures it.
    pub width: f32,
    /// Set once the presenter has replaced the placeholder width.
    pub measured: bool,
}

/// State shared between interpreter dispatch and the presentation layer.
///
/// Owned by the event loop and passed by reference; nothing else holds it,
/// so no synchronisation is involved.
#[derive(Debug)]
pub struct FeedState {
    target: Coordinates,
    items: Vec<DisplayItem>,
    canvas: Canvas,
    rng: SmallRng,
}

impl FeedState {
    pub fn new(canvas: Canvas) -> Self {
        Self::with_rng(canvas, SmallRng::from_entropy())
    }

    /// Creates a state whose randomised item attributes are reproducible.
    pub fn with_seed(canvas: Canvas, seed: u64) -> Self {
        Self::with_rng(canvas, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(canvas: Canvas, rng: SmallRng) -> Self {
        Self {
            target: Coordinates::default(),
            items: Vec::new(),
            canvas,
            rng,
        }
    }

    /// The most recent position received on a geo feed.
    pub fn target(&self) -> Coordinates {
        self.target
    }

    /// Live display items, oldest first.
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Mutable access for the presentation layer, which moves and expires items.
    pub fn items_mut(&mut self) -> &mut Vec<DisplayItem> {
        &mut self.items
    }

    pub fn live_items(&self) -> usize {
        self.items.len()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub(crate) fn set_target(&mut self, target: Coordinates) {
        self.target = target;
    }

    pub(crate) fn push_item(&mut self, item: DisplayItem) {
        self.items.push(item);
    }

    pub(crate) fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}
