use bytes::{Buf, Bytes};
use std::future::Future;
use std::io::{Error as IoError, ErrorKind};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// An [`AsyncRead`] fed by chunks sent over a channel. Useful for sources
/// that trickle in, such as a slow download or a test feeding data in parts.
/// The reader reports EOF once every sender is dropped.
pub struct ChannelReader {
    rx: mpsc::Receiver<Vec<u8>>,
    chunk: Bytes,
}

impl ChannelReader {
    pub fn new(rx: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            rx,
            chunk: Bytes::new(),
        }
    }
}

impl AsyncRead for ChannelReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<Result<(), IoError>> {
        while self.chunk.is_empty() {
            match Pin::new(&mut self.rx).poll_recv(cx) {
                Poll::Ready(Some(chunk)) => self.chunk = Bytes::from(chunk),
                Poll::Ready(None) => return Poll::Ready(Ok(())),
                Poll::Pending => return Poll::Pending,
            }
        }

        let to_copy = std::cmp::min(self.chunk.len(), buf.remaining());
        buf.put_slice(&self.chunk[..to_copy]);
        self.chunk.advance(to_copy);
        Poll::Ready(Ok(()))
    }
}

/// Error carried by reads that fail because the import was cancelled.
#[derive(Debug)]
pub(crate) struct ImportCancelled;

impl std::fmt::Display for ImportCancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("import cancelled")
    }
}

impl std::error::Error for ImportCancelled {}

/// Wraps a source so that a pending read fails as soon as the token is
/// cancelled.
pub(crate) struct CancellableReader<R> {
    inner: R,
    token: CancellationToken,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
}

impl<R> CancellableReader<R> {
    pub(crate) fn new(inner: R, token: CancellationToken) -> Self {
        let cancelled = Box::pin(token.clone().cancelled_owned());
        Self {
            inner,
            token,
            cancelled,
        }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CancellableReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<Result<(), IoError>> {
        // Other rather than Interrupted: std readers retry Interrupted forever.
        if self.token.is_cancelled() || self.cancelled.as_mut().poll(cx).is_ready() {
            return Poll::Ready(Err(IoError::new(ErrorKind::Other, ImportCancelled)));
        }
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}
