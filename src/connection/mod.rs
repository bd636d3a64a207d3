// src/connection/mod.rs

//! Per-connection protocol state and the registry that owns it.

mod registry;
mod session;

pub use registry::{ConnectionId, ConnectionRegistry};
pub use session::{Connection, ParserState};
