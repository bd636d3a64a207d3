// tests/property/split_test.rs

//! Chunking independence: a stream cut at arbitrary points must produce the
//! same lines and the same feed state as the stream delivered whole.

use bytes::BytesMut;
use poserspace::connection::{Connection, ConnectionRegistry};
use poserspace::core::protocol::LineCodec;
use poserspace::core::{Canvas, FeedState};
use proptest::prelude::*;
use tokio_util::codec::Decoder;

const CANVAS: Canvas = Canvas {
    width: 640,
    height: 480,
};
const SEED: u64 = 0x5eed;

fn connection() -> Connection {
    let mut registry = ConnectionRegistry::new();
    let id = registry.open("127.0.0.1:9".parse().unwrap());
    registry.close(id).unwrap()
}

fn feed_in_chunks(payload: &[u8], cuts: &[usize]) -> (FeedState, Vec<u8>) {
    let mut conn = connection();
    let mut feed = FeedState::with_seed(CANVAS, SEED);
    let mut start = 0;
    for &cut in cuts {
        conn.ingest(&payload[start..cut], &mut feed).unwrap();
        start = cut;
    }
    conn.ingest(&payload[start..], &mut feed).unwrap();
    let leftover = conn.buffered().to_vec();
    (feed, leftover)
}

fn record() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,12}",
        "[a-z]{1,6}\t[a-z]{1,6}",
        (-90.0f64..90.0, -180.0f64..180.0).prop_map(|(lat, lon)| format!("{lat}\t{lon}")),
    ]
}

fn payload() -> impl Strategy<Value = Vec<u8>> {
    (
        prop::sample::select(vec!["x-poserspace/text", "x-poserspace/geo", "other"]),
        prop::collection::vec(record(), 0..20),
        "[a-z]{0,5}",
    )
        .prop_map(|(content_type, records, tail)| {
            let mut text = format!("ACTION\nX-Seq: 1\nContent-type: {content_type}\n\n");
            for record in records {
                text.push_str(&record);
                text.push('\n');
            }
            text.push_str(&tail);
            text.into_bytes()
        })
}

proptest! {
    #[test]
    fn test_split_points_do_not_change_feed_state(
        payload in payload(),
        raw_cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut cuts: Vec<usize> = raw_cuts.iter().map(|i| i.index(payload.len() + 1)).collect();
        cuts.sort_unstable();

        let (whole, whole_left) = feed_in_chunks(&payload, &[]);
        let (split, split_left) = feed_in_chunks(&payload, &cuts);

        prop_assert_eq!(whole.items(), split.items());
        prop_assert_eq!(whole.target(), split.target());
        prop_assert_eq!(whole_left, split_left);
    }

    #[test]
    fn test_crlf_and_lf_decode_to_same_lines(
        lines in prop::collection::vec("[a-zA-Z0-9:\t ]{0,16}", 1..10),
    ) {
        let mut codec = LineCodec::new();
        let mut lf = BytesMut::from(lines.iter().map(|l| format!("{l}\n")).collect::<String>().as_bytes());
        let mut crlf = BytesMut::from(lines.iter().map(|l| format!("{l}\r\n")).collect::<String>().as_bytes());

        let mut from_lf = Vec::new();
        while let Some(line) = codec.decode(&mut lf).unwrap() {
            from_lf.push(line);
        }
        let mut from_crlf = Vec::new();
        while let Some(line) = codec.decode(&mut crlf).unwrap() {
            from_crlf.push(line);
        }

        prop_assert_eq!(&from_lf, &lines);
        prop_assert_eq!(from_crlf, from_lf);
    }
}
