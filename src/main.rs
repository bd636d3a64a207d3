// src/main.rs

//! The main entry point for the poserspace ingestion engine.

use anyhow::Result;
use poserspace::config::Config;
use poserspace::server;
use std::env;
use tracing::{error, info};
use tracing_subscriber::{filter::EnvFilter, prelude::*};

// The event loop, every parser and the feed state live on one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    run_app().await
}

async fn run_app() -> Result<()> {
    // Release builds may stamp their own version string.
    const VERSION: &str = match option_env!("POSERSPACE_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    };

    let args: Vec<String> = env::args().collect();

    if args.contains(&"--version".to_string()) {
        println!("poserspace version {VERSION}");
        return Ok(());
    }

    // Without --config the built-in defaults are used.
    let mut config = match args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
    {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e:#}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Some(port_index) = args.iter().position(|arg| arg == "--port") {
        if let Some(port_str) = args.get(port_index + 1) {
            match port_str.parse::<u16>() {
                Ok(port) if port != 0 => config.port = port,
                _ => {
                    eprintln!("Invalid port number: {port_str}");
                    std::process::exit(1);
                }
            }
        } else {
            eprintln!("--port flag requires a value");
            std::process::exit(1);
        }
    }

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact() // Use the compact, single-line format.
                .with_ansi(true),
        )
        .init();

    info!("Starting poserspace {VERSION}");

    if let Err(e) = server::run(config).await {
        error!("Server runtime error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
