// src/core/protocol/record.rs

//! Splits decoded lines into headers and tab-delimited records.

use crate::core::FeedError;

/// Field separator inside a data line.
pub const FIELD_SEPARATOR: char = '\t';

/// A `Name: value` header from the block that follows the action line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> Header<'a> {
    /// Splits `line` at its first colon. Only leading whitespace of the value
    /// is trimmed; the name is taken verbatim.
    pub fn parse(line: &'a str) -> Result<Self, FeedError> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| FeedError::MalformedHeader(line.to_string()))?;
        Ok(Header {
            name,
            value: value.trim_start(),
        })
    }
}

/// Splits a data line into its ordered fields. Always yields at least one
/// (possibly empty) field.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_SEPARATOR).collect()
}
