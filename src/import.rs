use futures::Stream;
use serde::{
    de::{self, DeserializeOwned, DeserializeSeed, SeqAccess, Visitor},
    Deserializer, Serialize,
};
use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::io::Read;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};
use tokio::{io::AsyncRead, sync::mpsc, task::JoinHandle};
use tokio_util::{io::SyncIoBridge, sync::CancellationToken};
use tracing::{debug, warn};

use crate::decoder::{decode_strict, ArrayDecoder, DecodeError};
use crate::reader::CancellableReader;
use crate::{metrics, ImportConfig, JsonStrategy};

type Terminal = Arc<OnceLock<Result<(), DecodeError>>>;

/// Handle to a running import.
///
/// Records arrive in source order through a bounded channel. When the
/// producer is done it stores its outcome once, and every read after the
/// last record reports that outcome: `Ok(None)` for a clean end, or the
/// same error again and again.
///
/// Dropping the handle cancels the producer.
pub struct RecordStream<T> {
    rx: mpsc::Receiver<T>,
    terminal: Terminal,
    observed: Option<Result<(), DecodeError>>,
    /// Set once the `Stream` impl has yielded its final item.
    exhausted: bool,
    token: CancellationToken,
    producer: Option<JoinHandle<()>>,
}

impl<T> Unpin for RecordStream<T> {}

impl<T: Send + 'static> RecordStream<T> {
    /// Runs `produce` on its own task. The sender handed to it feeds this
    /// stream and the token is cancelled when the stream is closed or
    /// dropped.
    pub(crate) fn spawn<F, Fut>(capacity: usize, produce: F) -> Self
    where
        F: FnOnce(mpsc::Sender<T>, CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), DecodeError>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let terminal: Terminal = Arc::new(OnceLock::new());
        let token = CancellationToken::new();

        let work = produce(tx.clone(), token.clone());
        let slot = Arc::clone(&terminal);
        let producer = tokio::spawn(async move {
            let outcome = work.await;
            match &outcome {
                Ok(()) => debug!("import finished"),
                Err(DecodeError::Cancelled) => warn!("import cancelled before the end of input"),
                Err(e) => {
                    metrics::inc_errors();
                    debug!(error = %e, "import failed");
                }
            }
            // The outcome must be visible before the channel reports closed.
            let _ = slot.set(outcome);
            drop(tx);
        });

        Self {
            rx,
            terminal,
            observed: None,
            exhausted: false,
            token,
            producer: Some(producer),
        }
    }
}

impl<T> RecordStream<T> {
    fn read_terminal(&self) -> Result<(), DecodeError> {
        self.terminal
            .get()
            .cloned()
            .unwrap_or(Err(DecodeError::Interrupted))
    }

    fn observe_end(&mut self) -> Result<(), DecodeError> {
        let outcome = self.read_terminal();
        self.observed = Some(outcome.clone());
        outcome
    }

    /// Waits for the next record. `Ok(None)` marks the end of the input.
    pub async fn next(&mut self) -> Result<Option<T>, DecodeError> {
        if let Some(outcome) = &self.observed {
            return outcome.clone().map(|()| None);
        }
        match self.rx.recv().await {
            Some(record) => {
                metrics::inc_records();
                Ok(Some(record))
            }
            None => self.observe_end().map(|()| None),
        }
    }

    /// Reads the remaining records into memory.
    pub async fn collect_all(mut self) -> Result<Vec<T>, DecodeError> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }

    /// Asks the producer to stop. Records already in the channel can
    /// still be read; after them the stream reports [`DecodeError::Cancelled`].
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Stops the producer and waits for it to finish.
    ///
    /// No record is returned after `close`. The result is the error the
    /// import ended with, if it ended with one other than the cancellation
    /// caused by closing. Calling `close` again returns the same result.
    pub async fn close(&mut self) -> Result<(), DecodeError> {
        self.token.cancel();
        self.rx.close();
        if let Some(producer) = self.producer.take() {
            if let Err(e) = producer.await {
                warn!(error = %e, "import task failed");
            }
        }

        let outcome = match &self.observed {
            Some(outcome) => outcome.clone(),
            None => self.observe_end(),
        };
        match outcome {
            Err(DecodeError::Cancelled) | Ok(()) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl<T> Drop for RecordStream<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl<T> Stream for RecordStream<T> {
    type Item = Result<T, DecodeError>;

    /// Yields every record, then the terminal error if there was one.
    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.exhausted {
            return Poll::Ready(None);
        }
        if let Some(outcome) = &this.observed {
            this.exhausted = true;
            return Poll::Ready(outcome.clone().err().map(Err));
        }
        match this.rx.poll_recv(cx) {
            Poll::Ready(Some(record)) => {
                metrics::inc_records();
                Poll::Ready(Some(Ok(record)))
            }
            Poll::Ready(None) => {
                this.exhausted = true;
                Poll::Ready(this.observe_end().err().map(Err))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Starts importing records from a JSON array.
///
/// The configured [`JsonStrategy`] picks the decoder. With
/// `strict_fields` set, an object carrying a field `T` does not model ends
/// the import with [`DecodeError::UnknownField`].
pub fn import_json<R, T>(reader: R, config: &ImportConfig) -> RecordStream<T>
where
    R: AsyncRead + Unpin + Send + 'static,
    T: DeserializeOwned + Serialize + Send + 'static,
{
    let config = config.clone();
    let capacity = config.channel_capacity;
    match config.json_strategy {
        JsonStrategy::Framed => RecordStream::spawn(capacity, move |tx, token| {
            produce_framed(ArrayDecoder::with_config(reader, config), tx, token)
        }),
        JsonStrategy::Bulk => RecordStream::spawn(capacity, move |tx, token| async move {
            let strict = config.strict_fields;
            let source = SyncIoBridge::new(CancellableReader::new(reader, token.clone()));
            tokio::task::spawn_blocking(move || decode_bulk(source, strict, &tx))
                .await
                .map_err(|_| DecodeError::Interrupted)?
        }),
    }
}

async fn produce_framed<R, T>(
    mut decoder: ArrayDecoder<R>,
    tx: mpsc::Sender<T>,
    token: CancellationToken,
) -> Result<(), DecodeError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned + Serialize,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(DecodeError::Cancelled),
            next = decoder.next::<T>() => next?,
        };
        let Some(record) = next else {
            return Ok(());
        };
        tokio::select! {
            biased;
            _ = token.cancelled() => return Err(DecodeError::Cancelled),
            sent = tx.send(record) => {
                if sent.is_err() {
                    return Err(DecodeError::Cancelled);
                }
            }
        }
    }
}

/// Deserializes the whole array in one pass on a blocking thread. The
/// sequence visitor sends each element into the channel as it is decoded.
fn decode_bulk<R, T>(source: R, strict: bool, tx: &mpsc::Sender<T>) -> Result<(), DecodeError>
where
    R: Read,
    T: DeserializeOwned + Serialize,
{
    let stop = Cell::new(None);
    let mut de = serde_json::Deserializer::from_reader(std::io::BufReader::new(source));
    let sink = ChannelSink {
        tx,
        strict,
        stop: &stop,
        _record: PhantomData,
    };
    let result = sink.deserialize(&mut de).and_then(|()| de.end());
    if let Some(e) = stop.take() {
        return Err(e);
    }
    Ok(result?)
}

struct ChannelSink<'a, T> {
    tx: &'a mpsc::Sender<T>,
    strict: bool,
    /// Why the visitor bailed out, when it was not a JSON error.
    stop: &'a Cell<Option<DecodeError>>,
    _record: PhantomData<T>,
}

impl<'de, 'a, T> DeserializeSeed<'de> for ChannelSink<'a, T>
where
    T: DeserializeOwned + Serialize,
{
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, 'a, T> Visitor<'de> for ChannelSink<'a, T>
where
    T: DeserializeOwned + Serialize,
{
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of records")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        loop {
            let record: T = if self.strict {
                let Some(value) = seq.next_element::<serde_json::Value>()? else {
                    break;
                };
                match decode_strict(value) {
                    Ok(record) => record,
                    Err(e) => {
                        self.stop.set(Some(e));
                        return Err(de::Error::custom("record rejected"));
                    }
                }
            } else {
                match seq.next_element::<T>()? {
                    Some(record) => record,
                    None => break,
                }
            };
            if self.tx.blocking_send(record).is_err() {
                self.stop.set(Some(DecodeError::Cancelled));
                return Err(de::Error::custom("consumer went away"));
            }
        }
        Ok(())
    }
}
