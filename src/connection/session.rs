// src/connection/session.rs

//! Defines the per-connection parser: receive buffer plus the three-state
//! protocol machine (action line, headers, data records).

use super::registry::ConnectionId;
use crate::core::interpreter::{CONTENT_TYPE_HEADER, Effect, Interpreter};
use crate::core::protocol::{Header, LineCodec, split_fields};
use crate::core::{FeedError, FeedState};
use bytes::BytesMut;
use std::net::SocketAddr;
use tokio_util::codec::Decoder;
use tracing::debug;

/// Where a connection is in the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Waiting for the first line, which is read and discarded.
    #[default]
    AwaitingAction,
    /// Reading `Name: value` lines until a blank line.
    ReadingHeaders,
    /// Every further line is a tab-separated record.
    ReadingData,
}

/// Holds the parser state of a single client connection.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    peer: SocketAddr,
    buffer: BytesMut,
    codec: LineCodec,
    state: ParserState,
    interpreter: Interpreter,
    records: u64,
}

impl Connection {
    pub fn new(id: ConnectionId, peer: SocketAddr) -> Self {
        Self {
            id,
            peer,
            buffer: BytesMut::new(),
            codec: LineCodec::new(),
            state: ParserState::default(),
            interpreter: Interpreter::default(),
            records: 0,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn interpreter(&self) -> Interpreter {
        self.interpreter
    }

    /// Bytes received but not yet terminated by a newline.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Data records seen on this connection so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Appends freshly read bytes and processes every complete line they finish.
    ///
    /// Returns the number of data records handed to the interpreter. A
    /// protocol error stops processing immediately; the caller is expected to
    /// drop the connection.
    pub fn ingest(&mut self, bytes: &[u8], feed: &mut FeedState) -> Result<usize, FeedError> {
        self.buffer.extend_from_slice(bytes);

        let mut dispatched = 0;
        while let Some(line) = self.codec.decode(&mut self.buffer)? {
            if self.handle_line(&line, feed)?.is_some() {
                dispatched += 1;
            }
        }
        Ok(dispatched)
    }

    /// Advances the protocol machine by one line.
    ///
    /// Yields the interpreter's effect for data lines and `None` for the
    /// action line and the header block.
    pub fn handle_line(
        &mut self,
        line: &str,
        feed: &mut FeedState,
    ) -> Result<Option<Effect>, FeedError> {
        match self.state {
            ParserState::AwaitingAction => {
                debug!("Connection {}: action line {:?}", self.id, line);
                self.state = ParserState::ReadingHeaders;
                Ok(None)
            }
            ParserState::ReadingHeaders if line.is_empty() => {
                debug!(
                    "Connection {}: header block complete, interpreter {:?}",
                    self.id, self.interpreter
                );
                self.state = ParserState::ReadingData;
                Ok(None)
            }
            ParserState::ReadingHeaders => {
                let header = Header::parse(line)?;
                self.bind_header(header);
                Ok(None)
            }
            ParserState::ReadingData => {
                self.records += 1;
                let fields = split_fields(line);
                match self.interpreter.dispatch(&fields, feed) {
                    Ok(effect) => Ok(Some(effect)),
                    Err(e) => {
                        debug!("Connection {}: dropping record {:?}: {}", self.id, line, e);
                        Ok(Some(Effect::Ignored))
                    }
                }
            }
        }
    }

    fn bind_header(&mut self, header: Header<'_>) {
        debug!(
            "Connection {}: header {} => {}",
            self.id, header.name, header.value
        );
        if header.name != CONTENT_TYPE_HEADER {
            return;
        }
        match Interpreter::for_content_type(header.value) {
            Some(interpreter) => self.interpreter = interpreter,
            None => debug!(
                "Connection {}: unrecognized content type {:?}",
                self.id, header.value
            ),
        }
    }
}
