// src/server/mod.rs

use crate::config::Config;
use crate::core::{FeedError, FeedState};
use crate::display::{HeadlessPresenter, Presenter};
use anyhow::Result;
use std::future::Future;
use std::net::SocketAddr;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info};

mod connection_loop;
mod context;
mod initialization;
mod stream;

pub use context::{LoopStats, ServerContext};
pub use stream::{Ingress, IngressStream};

/// A bound listener plus the state the event loop will own.
pub struct Server {
    ctx: ServerContext,
}

impl Server {
    /// Binds the listener. Fails with [`FeedError::Setup`] if the socket
    /// cannot be created, bound or put into listening mode.
    pub async fn bind(config: Config) -> Result<Self, FeedError> {
        let feed = FeedState::new(config.display.canvas());
        Self::with_feed(config, feed).await
    }

    /// Like [`Server::bind`], starting from a caller-provided feed state.
    pub async fn with_feed(config: Config, feed: FeedState) -> Result<Self, FeedError> {
        let ctx = initialization::setup(config, feed).await?;
        Ok(Self { ctx })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, FeedError> {
        Ok(self.ctx.listener.local_addr()?)
    }

    /// Runs the event loop on the current task until `shutdown` resolves and
    /// returns the final feed state.
    pub async fn serve<P, F>(self, presenter: &mut P, shutdown: F) -> Result<FeedState, FeedError>
    where
        P: Presenter + ?Sized,
        F: Future<Output = ()>,
    {
        connection_loop::run(self.ctx, presenter, shutdown).await
    }
}

/// The main server startup function: binds, then drives a headless presenter
/// until SIGINT or SIGTERM.
pub async fn run(config: Config) -> Result<()> {
    let log_every = config.display.log_every;
    let server = Server::bind(config).await?;
    let mut presenter = HeadlessPresenter::new(log_every);

    let feed = server.serve(&mut presenter, shutdown_signal()).await?;
    info!(
        "Stopped with {} live item(s); {} item(s) expired during the run.",
        feed.live_items(),
        presenter.expired()
    );
    Ok(())
}

async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            error!("Failed to register SIGTERM handler: {}", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for SIGINT: {}", e);
            }
            return;
        }
    };

    tokio::select! {
        res = tokio::signal::ctrl_c() => match res {
            Ok(()) => info!("SIGINT received, initiating shutdown."),
            Err(e) => error!("Failed to listen for SIGINT: {}. Shutting down.", e),
        },
        _ = sigterm.recv() => info!("SIGTERM received, initiating shutdown."),
    }
}
