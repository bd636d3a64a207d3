// src/server/context.rs

use super::stream::IngressStream;
use crate::config::Config;
use crate::connection::{ConnectionId, ConnectionRegistry};
use crate::core::FeedState;
use tokio::net::{TcpListener, TcpStream};
use tokio_stream::StreamMap;

/// Counters handed to the presenter on every tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Ticks delivered so far, counting the current one.
    pub ticks: u64,
    pub open_connections: usize,
    pub accepted_total: u64,
    /// Data records handed to an interpreter, including ignored ones.
    pub records_total: u64,
}

/// Holds everything the event loop owns. Nothing in here is shared with
/// another task.
pub struct ServerContext {
    pub config: Config,
    pub listener: TcpListener,
    pub registry: ConnectionRegistry,
    /// Readable halves of the open connections, keyed like the registry.
    pub streams: StreamMap<ConnectionId, IngressStream<TcpStream>>,
    pub feed: FeedState,
    pub stats: LoopStats,
}
