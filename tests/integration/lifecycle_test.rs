// tests/integration/lifecycle_test.rs

//! Connection lifecycle: closing, protocol violations, startup and shutdown.

use super::test_helpers::{TestServer, init_tracing, test_config};
use poserspace::config::Config;
use poserspace::server::Server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::test]
async fn test_close_mid_headers_releases_slot_only() {
    let mut server = TestServer::start().await;

    let mut keeper = server
        .send(b"ACTION\nContent-type: x-poserspace/text\n\n")
        .await;
    let quitter = server.send(b"ACTION\nContent-").await;
    server
        .wait_for(|s| s.stats.accepted_total == 2 && s.stats.open_connections == 2)
        .await;

    drop(quitter);
    server
        .wait_for(|s| s.stats.open_connections == 1)
        .await;

    keeper.write_all(b"still here\n").await.unwrap();
    let snapshot = server.wait_for(|s| !s.texts.is_empty()).await;
    assert_eq!(snapshot.texts, vec!["still here".to_string()]);
    assert_eq!(snapshot.stats.open_connections, 1);

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_header_drops_only_offender() {
    let mut server = TestServer::start().await;

    let mut good = server
        .send(b"ACTION\nContent-type: x-poserspace/text\n\none\n")
        .await;
    server.wait_for(|s| s.texts.len() == 1).await;

    let mut bad = server.send(b"ACTION\nthis header has no colon\n").await;
    let mut buf = [0u8; 16];
    let read = tokio::time::timeout(std::time::Duration::from_secs(5), bad.read(&mut buf))
        .await
        .expect("server never closed the offending connection");
    assert!(matches!(read, Ok(0) | Err(_)));

    good.write_all(b"two\n").await.unwrap();
    let snapshot = server.wait_for(|s| s.texts.len() == 2).await;
    assert_eq!(snapshot.texts, vec!["one".to_string(), "two".to_string()]);
    assert_eq!(snapshot.stats.open_connections, 1);
    assert_eq!(snapshot.stats.accepted_total, 2);

    server.stop().await;
}

#[tokio::test]
async fn test_data_after_malformed_header_is_never_applied() {
    let mut server = TestServer::start().await;

    let _bad = server
        .send(b"ACTION\nContent-type: x-poserspace/text\nbroken\n\nlost\n")
        .await;
    let snapshot = server
        .wait_for(|s| s.stats.accepted_total == 1 && s.stats.open_connections == 0)
        .await;
    assert!(snapshot.texts.is_empty());
    assert_eq!(snapshot.stats.records_total, 0);

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_returns_feed_state() {
    let mut server = TestServer::start().await;

    let _client = server
        .send(b"ACTION\nContent-type: x-poserspace/text\n\nkept\n")
        .await;
    server.wait_for(|s| s.texts.len() == 1).await;

    let feed = server.stop().await;
    assert_eq!(feed.items().len(), 1);
    assert_eq!(feed.items()[0].text, "kept");
}

#[tokio::test]
async fn test_bind_to_taken_port_is_fatal() {
    init_tracing();

    let first = Server::bind(test_config()).await.unwrap();
    let port = first.local_addr().unwrap().port();

    let err = match Server::bind(Config { port, ..test_config() }).await {
        Ok(_) => panic!("second listener on port {port} should not bind"),
        Err(e) => e,
    };
    assert!(err.is_fatal());
    assert!(err.to_string().contains("bind"));
}

#[tokio::test]
async fn test_invalid_host_is_setup_error() {
    let config = Config {
        host: "not-an-ip".to_string(),
        ..test_config()
    };
    let err = match Server::bind(config).await {
        Ok(_) => panic!("a non-IPv4 host should be rejected"),
        Err(e) => e,
    };
    assert!(err.is_fatal());
}
