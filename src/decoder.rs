use bytes::{Buf, BytesMut};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    time::timeout,
};
use tracing::{debug, instrument};

use crate::framing::{array_start, whitespace_len, Delimiter, ObjectScanner};
use crate::reader::ImportCancelled;
use crate::time::TimeFormatError;
use crate::ImportConfig;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(Arc<std::io::Error>),
    #[error("JSON parsing error: {0}")]
    Json(String),
    #[error("invalid character {found:?} at offset {offset}, expected {expected}")]
    Framing {
        found: char,
        offset: u64,
        expected: &'static str,
    },
    #[error("input ended before the array was closed")]
    Truncated,
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("cannot parse {field} value {value:?}: {reason}")]
    Field {
        field: String,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    Time(#[from] TimeFormatError),
    #[error("unknown field {path}")]
    UnknownField { path: String },
    #[error("Timeout while waiting for data")]
    Timeout,
    #[error("import cancelled")]
    Cancelled,
    #[error("import stopped without reporting a result")]
    Interrupted,
}

impl From<std::io::Error> for DecodeError {
    fn from(e: std::io::Error) -> Self {
        let cancelled = e
            .get_ref()
            .is_some_and(|inner| inner.downcast_ref::<ImportCancelled>().is_some());
        if cancelled {
            return DecodeError::Cancelled;
        }
        DecodeError::Io(Arc::new(e))
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            return DecodeError::from(std::io::Error::from(e));
        }
        if e.is_eof() {
            return DecodeError::Truncated;
        }
        DecodeError::Json(e.to_string())
    }
}

impl From<simd_json::Error> for DecodeError {
    fn from(e: simd_json::Error) -> Self {
        DecodeError::Json(e.to_string())
    }
}

/// Decodes a JSON value into `T`, failing when the value carries a field
/// that `T` does not model. The check compares the input with `T`
/// serialized back, so it relies on `T` serializing every field it reads.
pub(crate) fn decode_strict<T>(value: serde_json::Value) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Serialize,
{
    let record: T = serde_json::from_value(value.clone())?;
    let modelled = serde_json::to_value(&record)?;
    match find_unknown_field(&value, &modelled, "") {
        Some(path) => Err(DecodeError::UnknownField { path }),
        None => Ok(record),
    }
}

fn find_unknown_field(
    input: &serde_json::Value,
    modelled: &serde_json::Value,
    prefix: &str,
) -> Option<String> {
    use serde_json::Value;

    match (input, modelled) {
        (Value::Object(input), Value::Object(modelled)) => {
            for (key, value) in input {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match modelled.get(key) {
                    None => return Some(path),
                    Some(inner) => {
                        if let Some(found) = find_unknown_field(value, inner, &path) {
                            return Some(found);
                        }
                    }
                }
            }
            None
        }
        (Value::Array(input), Value::Array(modelled)) => input
            .iter()
            .zip(modelled)
            .enumerate()
            .find_map(|(i, (a, b))| find_unknown_field(a, b, &format!("{prefix}[{i}]"))),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    /// Looking for the opening bracket.
    Opening,
    /// Just past `[`; either an object or `]`.
    First,
    /// Just past `,`; an object must follow.
    Element,
    Delimiter,
    Closed,
}

/// Pulls one object at a time out of a top-level JSON array.
///
/// Anything before the first `[` is skipped. Only the bytes of the current
/// object are ever decoded, so memory use is bounded by the largest record
/// rather than by the export.
pub struct ArrayDecoder<R> {
    reader: R,
    buffer: BytesMut,
    /// Source offset of `buffer[0]`.
    offset: u64,
    state: FrameState,
    config: ImportConfig,
}

impl<R: AsyncRead + Unpin> ArrayDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ImportConfig::default())
    }

    pub fn with_config(reader: R, config: ImportConfig) -> Self {
        Self {
            reader,
            buffer: BytesMut::with_capacity(config.read_buffer_size),
            offset: 0,
            state: FrameState::Opening,
            config,
        }
    }

    /// Reads more input. Returns `false` at end of input.
    async fn fill_buffer(&mut self) -> Result<bool, DecodeError> {
        self.buffer.reserve(self.config.read_buffer_size);
        let read_fut = self.reader.read_buf(&mut self.buffer);
        let bytes_read = match self.config.timeout {
            Some(t) => timeout(t, read_fut)
                .await
                .map_err(|_| DecodeError::Timeout)??,
            None => read_fut.await?,
        };
        Ok(bytes_read > 0)
    }

    fn advance(&mut self, n: usize) {
        self.buffer.advance(n);
        self.offset += n as u64;
    }

    /// Drops leading whitespace and returns the next byte, reading more
    /// input as needed. `None` means the input ended.
    async fn peek_significant(&mut self) -> Result<Option<u8>, DecodeError> {
        loop {
            let ws = whitespace_len(&self.buffer);
            self.advance(ws);
            if let Some(&b) = self.buffer.first() {
                return Ok(Some(b));
            }
            if !self.fill_buffer().await? {
                return Ok(None);
            }
        }
    }

    fn framing_error(&self, found: u8, expected: &'static str) -> DecodeError {
        DecodeError::Framing {
            found: char::from(found),
            offset: self.offset,
            expected,
        }
    }

    /// Returns the next record, or `None` once the closing bracket is read.
    #[instrument(skip(self))]
    pub async fn next<T>(&mut self) -> Result<Option<T>, DecodeError>
    where
        T: DeserializeOwned + Serialize,
    {
        loop {
            match self.state {
                FrameState::Closed => return Ok(None),
                FrameState::Opening => {
                    if let Some(start) = array_start(&self.buffer) {
                        self.advance(start);
                        self.state = FrameState::First;
                        debug!(offset = self.offset, "found start of array");
                        continue;
                    }
                    let skipped = self.buffer.len();
                    self.advance(skipped);
                    if !self.fill_buffer().await? {
                        return Err(DecodeError::Truncated);
                    }
                }
                FrameState::First | FrameState::Element => {
                    let Some(b) = self.peek_significant().await? else {
                        return Err(DecodeError::Truncated);
                    };
                    match b {
                        b'{' => return self.decode_object().await.map(Some),
                        b']' if self.state == FrameState::First => {
                            self.advance(1);
                            self.state = FrameState::Closed;
                        }
                        other => return Err(self.framing_error(other, "'{'")),
                    }
                }
                FrameState::Delimiter => {
                    let Some(b) = self.peek_significant().await? else {
                        return Err(DecodeError::Truncated);
                    };
                    match Delimiter::classify(b) {
                        Delimiter::Next => {
                            self.advance(1);
                            self.state = FrameState::Element;
                        }
                        Delimiter::Close => {
                            self.advance(1);
                            self.state = FrameState::Closed;
                            debug!(offset = self.offset, "end of array");
                        }
                        Delimiter::Invalid(other) => {
                            return Err(self.framing_error(other, "',' or ']'"))
                        }
                    }
                }
            }
        }
    }

    async fn decode_object<T>(&mut self) -> Result<T, DecodeError>
    where
        T: DeserializeOwned + Serialize,
    {
        let mut scanner = ObjectScanner::default();
        let len = loop {
            if let Some(len) = scanner.scan(&self.buffer) {
                break len;
            }
            if !self.fill_buffer().await? {
                return Err(DecodeError::Truncated);
            }
        };

        let mut frame = self.buffer.split_to(len).to_vec();
        self.offset += len as u64;
        self.state = FrameState::Delimiter;

        if self.config.strict_fields {
            let value: serde_json::Value = simd_json::from_slice(&mut frame)?;
            decode_strict(value)
        } else {
            Ok(simd_json::from_slice(&mut frame)?)
        }
    }
}
