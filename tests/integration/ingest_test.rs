// tests/integration/ingest_test.rs

//! End-to-end feeds over real sockets.

use super::test_helpers::TestServer;
use poserspace::core::Coordinates;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn test_geo_feed_moves_target() {
    let mut server = TestServer::start().await;

    let _client = server
        .send(b"ACTION\r\nContent-type: x-poserspace/geo\r\n\r\n10.0\t20.0\r\n")
        .await;

    let snapshot = server
        .wait_for(|s| s.target == Coordinates::new(10.0, 20.0))
        .await;
    assert!(snapshot.texts.is_empty());
    assert_eq!(snapshot.stats.records_total, 1);

    server.stop().await;
}

#[tokio::test]
async fn test_text_feed_creates_one_item_per_nonempty_record() {
    let mut server = TestServer::start().await;

    let mut client = server
        .send(b"ACTION\nContent-type: x-poserspace/text\n\nhello\n")
        .await;
    let snapshot = server.wait_for(|s| !s.texts.is_empty()).await;
    assert_eq!(snapshot.texts, vec!["hello".to_string()]);

    // Two empty-field records, then a marker to know they were processed.
    client.write_all(b"\tignored\n\nworld\n").await.unwrap();
    let snapshot = server
        .wait_for(|s| s.texts.iter().any(|t| t == "world"))
        .await;
    assert_eq!(snapshot.texts, vec!["hello".to_string(), "world".to_string()]);
    assert_eq!(snapshot.stats.records_total, 4);

    let feed = server.stop().await;
    assert_eq!(feed.live_items(), 2);
    assert_eq!(feed.target(), Coordinates::default());
}

#[tokio::test]
async fn test_bad_geo_samples_keep_connection_alive() {
    let mut server = TestServer::start().await;

    let mut client = server
        .send(b"ACTION\nContent-type: x-poserspace/geo\n\n12.5\t-3.25\n")
        .await;
    server
        .wait_for(|s| s.target == Coordinates::new(12.5, -3.25))
        .await;

    client
        .write_all(b"north\teast\nonly-one-field\n1.5\t2.5\n")
        .await
        .unwrap();
    let snapshot = server
        .wait_for(|s| s.target == Coordinates::new(1.5, 2.5))
        .await;
    assert_eq!(snapshot.stats.open_connections, 1);
    assert_eq!(snapshot.stats.records_total, 4);

    server.stop().await;
}

#[tokio::test]
async fn test_unrecognized_content_type_drops_records() {
    let mut server = TestServer::start().await;

    let _client = server
        .send(b"ACTION\nContent-type: x-poserspace/video\n\nhello\n1.0\t2.0\n")
        .await;
    let snapshot = server.wait_for(|s| s.stats.records_total == 2).await;
    assert!(snapshot.texts.is_empty());
    assert_eq!(snapshot.target, Coordinates::default());
    assert_eq!(snapshot.stats.open_connections, 1);

    server.stop().await;
}

#[tokio::test]
async fn test_header_name_is_case_sensitive() {
    let mut server = TestServer::start().await;

    let _client = server
        .send(b"ACTION\ncontent-type: x-poserspace/text\n\nhello\n")
        .await;
    let snapshot = server.wait_for(|s| s.stats.records_total == 1).await;
    assert!(snapshot.texts.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_byte_by_byte_writes_parse_like_one_write() {
    let mut server = TestServer::start().await;

    let payload = b"ACTION\r\nContent-type: x-poserspace/text\r\n\r\nslow\r\nfeed\n";
    let mut client = server.connect().await;
    for byte in payload.iter() {
        client.write_all(std::slice::from_ref(byte)).await.unwrap();
        client.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    let snapshot = server.wait_for(|s| s.texts.len() == 2).await;
    assert_eq!(snapshot.texts, vec!["slow".to_string(), "feed".to_string()]);

    server.stop().await;
}

#[tokio::test]
async fn test_geo_and_text_feeds_share_one_loop() {
    let mut server = TestServer::start().await;

    let _geo = server
        .send(b"ACTION\nContent-type: x-poserspace/geo\n\n-52.25\t10.5\n")
        .await;
    let _text = server
        .send(b"ACTION\nContent-type: x-poserspace/text\n\nboth\n")
        .await;

    let snapshot = server
        .wait_for(|s| s.target == Coordinates::new(-52.25, 10.5) && !s.texts.is_empty())
        .await;
    assert_eq!(snapshot.texts, vec!["both".to_string()]);
    assert_eq!(snapshot.stats.accepted_total, 2);

    server.stop().await;
}
