// src/display/mod.rs

//! Presentation-side collaborators: the per-tick callback and the motion
//! model of the on-screen elements. Nothing here draws pixels.

pub mod motion;
mod presenter;

pub use motion::GeoTracker;
pub use presenter::{HeadlessPresenter, Presenter};
