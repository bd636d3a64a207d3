// src/core/interpreter/mod.rs

//! Content interpreters and the dispatch that applies a record to the feed state.

pub mod geo;
pub mod text;

use crate::core::FeedError;
use crate::core::feed::{Coordinates, FeedState};

/// The header whose value selects a connection's interpreter.
pub const CONTENT_TYPE_HEADER: &str = "Content-type";
pub const TEXT_CONTENT_TYPE: &str = "x-poserspace/text";
pub const GEO_CONTENT_TYPE: &str = "x-poserspace/geo";

/// How a connection's data records are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpreter {
    /// No recognized content type was announced; records are dropped.
    #[default]
    Noop,
    Text,
    Geo,
}

/// What a single record did to the feed state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    ItemAdded,
    TargetMoved(Coordinates),
    Ignored,
}

impl Interpreter {
    /// Maps a `Content-type` value to its interpreter. Matching is exact.
    pub fn for_content_type(value: &str) -> Option<Self> {
        match value {
            TEXT_CONTENT_TYPE => Some(Interpreter::Text),
            GEO_CONTENT_TYPE => Some(Interpreter::Geo),
            _ => None,
        }
    }

    pub fn content_type(self) -> Option<&'static str> {
        match self {
            Interpreter::Noop => None,
            Interpreter::Text => Some(TEXT_CONTENT_TYPE),
            Interpreter::Geo => Some(GEO_CONTENT_TYPE),
        }
    }

    /// Applies one record to `feed`.
    ///
    /// Returns `MissingFields` when the record is too short for this
    /// interpreter; the feed state is left untouched in that case.
    pub fn dispatch(self, fields: &[&str], feed: &mut FeedState) -> Result<Effect, FeedError> {
        match self {
            Interpreter::Noop => Ok(Effect::Ignored),
            Interpreter::Text => {
                let text = fields.first().copied().unwrap_or_default();
                if text.is_empty() {
                    return Ok(Effect::Ignored);
                }
                let live = feed.live_items();
                let canvas = feed.canvas();
                let item = text::spawn_item(text, live, canvas, feed.rng());
                feed.push_item(item);
                Ok(Effect::ItemAdded)
            }
            Interpreter::Geo => {
                let target = geo::parse_record(fields)?;
                feed.set_target(target);
                Ok(Effect::TargetMoved(target))
            }
        }
    }
}
