// src/core/errors.rs

//! Defines the primary error type for the ingestion engine.

use thiserror::Error;

/// Every failure the engine can produce, grouped by how far it is allowed to spread.
///
/// Only [`FeedError::Setup`] is fatal. Everything else is scoped to the one
/// connection (or the one record) that caused it.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Socket creation, bind, listen or accept failed.
    #[error("failed to {action}: {source}")]
    Setup {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A header line without a `:` separator.
    #[error("invalid header line {0:?}: missing ':'")]
    MalformedHeader(String),

    /// A data record carried fewer fields than its interpreter needs.
    #[error("record has {found} field(s), expected at least {expected}")]
    MissingFields { expected: usize, found: usize },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Wraps an I/O failure that happened while bringing the listener up.
    pub fn setup(action: &'static str, source: std::io::Error) -> Self {
        FeedError::Setup { action, source }
    }

    /// Returns true if the error must stop the whole event loop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FeedError::Setup { .. })
    }
}
