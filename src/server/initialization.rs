// src/server/initialization.rs

//! Brings the listener and the loop-owned state up before the event loop starts.

use super::context::{LoopStats, ServerContext};
use crate::config::Config;
use crate::connection::ConnectionRegistry;
use crate::core::{FeedError, FeedState};
use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket};
use tokio_stream::StreamMap;
use tracing::info;

/// Initializes all server components before starting the main loop.
pub(crate) async fn setup(config: Config, feed: FeedState) -> Result<ServerContext, FeedError> {
    log_startup_info(&config);

    let listener = bind_listener(&config)?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| FeedError::setup("read listener address", e))?;
    info!("poserspace listening on {}", local_addr);

    Ok(ServerContext {
        config,
        listener,
        registry: ConnectionRegistry::new(),
        streams: StreamMap::new(),
        feed,
        stats: LoopStats::default(),
    })
}

/// Creates the IPv4 listening socket with address reuse enabled and the
/// configured backlog.
pub(crate) fn bind_listener(config: &Config) -> Result<TcpListener, FeedError> {
    let ip = config.listen_ip().map_err(|e| {
        FeedError::setup(
            "parse listen address",
            io::Error::new(io::ErrorKind::InvalidInput, e),
        )
    })?;
    let addr = SocketAddr::from((ip, config.port));

    let socket = TcpSocket::new_v4().map_err(|e| FeedError::setup("create listening socket", e))?;
    socket
        .set_reuseaddr(true)
        .map_err(|e| FeedError::setup("enable address reuse", e))?;
    socket
        .bind(addr)
        .map_err(|e| FeedError::setup("bind listening socket", e))?;
    socket
        .listen(config.backlog)
        .map_err(|e| FeedError::setup("listen on socket", e))
}

/// Logs key configuration parameters at startup.
fn log_startup_info(config: &Config) {
    info!(
        "Tick interval {:?}, read buffer {} bytes, backlog {}.",
        config.tick_interval, config.read_buffer_size, config.backlog
    );
    info!(
        "Canvas {}x{} px.",
        config.display.width, config.display.height
    );
}
