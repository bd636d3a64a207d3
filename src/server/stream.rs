// src/server/stream.rs

use bytes::Bytes;
use futures::Stream;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// One readiness outcome for a connection.
#[derive(Debug)]
pub enum Ingress {
    /// Up to one read buffer's worth of bytes.
    Data(Bytes),
    /// The peer closed its side.
    Closed,
    /// The read failed; the connection is unusable.
    Failed(io::Error),
}

/// Turns a reader into a stream of [`Ingress`] events that always ends with
/// exactly one `Closed` or `Failed` item.
///
/// `StreamMap` silently drops streams that finish, so the terminal event is
/// what lets the event loop release the connection's registry slot.
#[derive(Debug)]
pub struct IngressStream<R> {
    inner: ReaderStream<R>,
    done: bool,
}

impl<R: AsyncRead> IngressStream<R> {
    pub fn new(reader: R, read_buffer_size: usize) -> Self {
        Self {
            inner: ReaderStream::with_capacity(reader, read_buffer_size),
            done: false,
        }
    }
}

impl<R: AsyncRead + Unpin> Stream for IngressStream<R> {
    type Item = Ingress;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }

        let event = match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
            Some(Ok(bytes)) => Ingress::Data(bytes),
            Some(Err(e)) => {
                this.done = true;
                Ingress::Failed(e)
            }
            None => {
                this.done = true;
                Ingress::Closed
            }
        };
        Poll::Ready(Some(event))
    }
}
