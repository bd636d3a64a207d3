// src/bin/feed.rs

//! Streams stdin to a running poserspace engine, one data record per line.
//!
//! Usage: poserspace-feed [--host <ip>] [--port <port>] [--content-type text|geo]

use anyhow::{Context, Result, bail};
use futures::SinkExt;
use poserspace::config::Config;
use poserspace::core::Interpreter;
use poserspace::core::interpreter::CONTENT_TYPE_HEADER;
use poserspace::core::protocol::LineCodec;
use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio_util::codec::FramedWrite;
use tracing::{debug, info};

/// The action line is read and ignored by the engine.
const ACTION: &str = "FEED";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args: Vec<String> = env::args().collect();
    let host = flag(&args, "--host").unwrap_or("127.0.0.1");
    let port = match flag(&args, "--port") {
        Some(port) => port
            .parse::<u16>()
            .with_context(|| format!("Invalid port number: {port}"))?,
        None => Config::default().port,
    };
    let interpreter = match flag(&args, "--content-type").unwrap_or("text") {
        "text" => Interpreter::Text,
        "geo" => Interpreter::Geo,
        other => bail!("unknown content type '{other}', expected 'text' or 'geo'"),
    };
    let content_type = interpreter
        .content_type()
        .context("interpreter has no content type")?;

    let stream = TcpStream::connect((host, port))
        .await
        .with_context(|| format!("Failed to connect to {host}:{port}"))?;
    info!("Connected to {}:{} as {}", host, port, content_type);

    let mut sink = FramedWrite::new(stream, LineCodec::new());
    sink.send(ACTION).await?;
    let header = format!("{CONTENT_TYPE_HEADER}: {content_type}");
    sink.send(header.as_str()).await?;
    sink.send("").await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut sent: u64 = 0;
    while let Some(line) = lines.next_line().await? {
        debug!("Sending {:?}", line);
        sink.send(line.as_str()).await?;
        sent += 1;
    }
    SinkExt::<&str>::close(&mut sink).await?;

    info!("Sent {} record(s).", sent);
    Ok(())
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}
