// src/core/protocol/line_codec.rs

//! Implements the newline framing used by the feed protocol as a
//! `tokio_util::codec` `Decoder` and `Encoder`.

use crate::core::FeedError;
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// Splits a byte stream into lines terminated by `\n` or `\r\n`.
///
/// The terminator is never part of the decoded line. Bytes after the last
/// terminator stay in the buffer until more data arrives.
#[derive(Debug, Default, Clone)]
pub struct LineCodec {
    /// Bytes of `src` already searched for a terminator. Resuming here keeps
    /// a long unterminated line from being rescanned on every read.
    next_index: usize,
}

impl LineCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = FeedError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let start = self.next_index.min(src.len());
        let Some(offset) = src[start..].iter().position(|&b| b == LF) else {
            self.next_index = src.len();
            return Ok(None);
        };
        let pos = start + offset;
        self.next_index = 0;

        let mut line = src.split_to(pos + 1);
        line.truncate(pos);
        if line.last() == Some(&CR) {
            line.truncate(pos - 1);
        }

        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Unlike the default implementation, an unterminated tail at end of
    /// stream is dropped instead of being reported as an error.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None => {
                if !src.is_empty() {
                    trace!("Discarding {} unterminated byte(s) at end of stream", src.len());
                    src.advance(src.len());
                }
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}

impl<'a> Encoder<&'a str> for LineCodec {
    type Error = FeedError;

    fn encode(&mut self, item: &'a str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len() + 2);
        dst.put_slice(item.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
