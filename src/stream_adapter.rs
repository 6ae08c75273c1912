use bytes::{Buf, Bytes};
use futures::Stream;
use std::error::Error as StdError;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Exposes a stream of byte chunks, such as an HTTP response body, as an
/// [`AsyncRead`] so the importers can consume it.
pub struct BodyReader<S> {
    stream: S,
    chunk: Bytes,
}

impl<S> BodyReader<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            chunk: Bytes::new(),
        }
    }
}

impl<S, E> AsyncRead for BodyReader<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        while self.chunk.is_empty() {
            match Pin::new(&mut self.stream).poll_next(cx) {
                Poll::Ready(Some(Ok(data))) => self.chunk = data,
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Err(std::io::Error::new(std::io::ErrorKind::Other, e)))
                }
                Poll::Ready(None) => return Poll::Ready(Ok(())), // EOF
                Poll::Pending => return Poll::Pending,
            }
        }

        let len = std::cmp::min(self.chunk.len(), buf.remaining());
        buf.put_slice(&self.chunk[..len]);
        self.chunk.advance(len);
        Poll::Ready(Ok(()))
    }
}
