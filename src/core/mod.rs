// src/core/mod.rs

//! The protocol, interpreters and published state at the heart of the engine.

pub mod errors;
pub mod feed;
pub mod interpreter;
pub mod protocol;

pub use errors::FeedError;
pub use feed::{Canvas, Coordinates, DisplayItem, FeedState, Rgb};
pub use interpreter::{Effect, Interpreter};
