// src/core/protocol/mod.rs

pub mod line_codec;
pub mod record;
pub use line_codec::LineCodec;
pub use record::{FIELD_SEPARATOR, Header, split_fields};
