// src/server/connection_loop.rs

//! Contains the single-threaded event loop: accepting connections, feeding
//! their bytes to the parsers, and pacing the presentation ticks.

use super::context::ServerContext;
use super::stream::{Ingress, IngressStream};
use crate::connection::ConnectionId;
use crate::core::{FeedError, FeedState};
use crate::display::Presenter;
use futures::StreamExt;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, trace, warn};

/// Runs the loop until `shutdown` resolves, then hands back the feed state.
///
/// Each iteration first delivers a tick if its deadline has passed, then waits
/// for whichever comes first: shutdown, data on a connection, a new
/// connection, or the next tick deadline. Only setup failures (including a
/// failed `accept`) end the loop early.
pub async fn run<P, F>(
    mut ctx: ServerContext,
    presenter: &mut P,
    shutdown: F,
) -> Result<FeedState, FeedError>
where
    P: Presenter + ?Sized,
    F: Future<Output = ()>,
{
    let period = ctx.config.tick_interval;
    let mut next_tick = Instant::now() + period;
    tokio::pin!(shutdown);

    loop {
        let now = Instant::now();
        if now >= next_tick {
            ctx.stats.ticks += 1;
            ctx.stats.open_connections = ctx.registry.len();
            presenter.tick(&mut ctx.feed, &ctx.stats);
            next_tick = now + period;
        }

        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!("Shutdown requested, closing {} connection(s).", ctx.registry.len());
                break;
            }

            Some((id, ingress)) = ctx.streams.next(), if !ctx.streams.is_empty() => {
                handle_ingress(&mut ctx, id, ingress);
            }

            res = ctx.listener.accept() => {
                let (socket, addr) = res.map_err(|e| FeedError::setup("accept connection", e))?;
                register(&mut ctx, socket, addr);
            }

            _ = sleep_until(next_tick) => {}
        }
    }

    Ok(ctx.feed)
}

fn register(ctx: &mut ServerContext, socket: TcpStream, addr: SocketAddr) {
    let id = ctx.registry.open(addr);
    ctx.stats.accepted_total += 1;
    ctx.streams
        .insert(id, IngressStream::new(socket, ctx.config.read_buffer_size));
    info!("Accepted connection {} from {}", id, addr);
}

fn handle_ingress(ctx: &mut ServerContext, id: ConnectionId, ingress: Ingress) {
    match ingress {
        Ingress::Data(bytes) => {
            let Some(conn) = ctx.registry.get_mut(id) else {
                warn!("Data for unknown connection {}, dropping its stream.", id);
                ctx.streams.remove(&id);
                return;
            };
            trace!("Connection {}: {} byte(s) received", id, bytes.len());
            match conn.ingest(&bytes, &mut ctx.feed) {
                Ok(records) => ctx.stats.records_total += records as u64,
                Err(e) => {
                    warn!("Dropping connection {} from {}: {}", id, conn.peer(), e);
                    close(ctx, id);
                }
            }
        }
        Ingress::Closed => {
            debug!("Connection {} closed by peer.", id);
            close(ctx, id);
        }
        Ingress::Failed(e) => {
            warn!("Read error on connection {}: {}", id, e);
            close(ctx, id);
        }
    }
}

/// Unregisters the stream (dropping the socket) and releases the registry slot.
fn close(ctx: &mut ServerContext, id: ConnectionId) {
    ctx.streams.remove(&id);
    if let Some(conn) = ctx.registry.close(id) {
        if !conn.buffered().is_empty() {
            trace!(
                "Connection {}: discarding {} unterminated byte(s)",
                id,
                conn.buffered().len()
            );
        }
        info!(
            "Closed connection {} from {} after {} record(s).",
            id,
            conn.peer(),
            conn.records()
        );
    }
}
