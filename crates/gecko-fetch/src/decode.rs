//! Incremental decoding of a JSON array off a byte stream.
//!
//! [`decode_array`] reads the opening `[`, then frames and deserializes one
//! element at a time, then reads the closing `]`. Only the current transport
//! chunk and the bytes of the element being framed are held in memory, so a
//! page of any length costs no more than its largest element.

use bytes::Bytes;
use futures::stream::{Fuse, Stream, StreamExt};
use serde::de::DeserializeOwned;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Low level failure while reading the array structure.
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// The stream ended where more input was required.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// A structural byte other than the expected one.
    #[error("unexpected character {found:?}, expected {expected}")]
    Unexpected {
        /// The byte that was read.
        found: char,
        /// What the decoder was looking for.
        expected: &'static str,
    },

    /// Reading the underlying body failed.
    #[error("reading body: {0}")]
    Read(#[source] BoxError),

    /// The framed element is not valid for the target type.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while decoding a response body.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The body does not begin with a JSON array.
    #[error("invalid start token: {0}")]
    InvalidStartToken(#[source] SyntaxError),

    /// An array element could not be decoded.
    #[error("decoding record {index}: {source}")]
    Record {
        /// Zero based position of the element in the array.
        index: usize,
        /// Underlying failure.
        #[source]
        source: SyntaxError,
    },

    /// The array is not properly closed.
    #[error("invalid end token: {0}")]
    InvalidEndToken(#[source] SyntaxError),

    /// A buffered body is not valid for the target type.
    #[error("decoding response body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Decodes a JSON array of `T` from a byte stream.
///
/// `expected` is the number of elements the caller asked for. It sizes the
/// output up front but does not bound it: a short final page or an oversized
/// one both decode in full. An `expected` of zero returns an empty vector
/// without polling the stream.
///
/// The stream is consumed, so it is dropped (closing the connection behind
/// it) exactly once when this function returns, whatever the outcome.
///
/// # Errors
///
/// - [`DecodeError::InvalidStartToken`] if the stream is empty, fails, or
///   does not open with `[`.
/// - [`DecodeError::Record`] if any element is malformed, truncated, or not a
///   valid `T`. Elements decoded before it are discarded.
/// - [`DecodeError::InvalidEndToken`] if the stream ends or fails before the
///   closing `]`, or something other than `]` follows the last element.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use futures::stream;
///
/// let body = stream::iter(vec![
///     Ok::<_, std::io::Error>(Bytes::from_static(b"[1, 2,")),
///     Ok(Bytes::from_static(b" 3]")),
/// ]);
/// let values: Vec<u32> =
///     futures::executor::block_on(gecko_fetch::decode_array(body, 3)).unwrap();
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
pub async fn decode_array<T, S, E>(stream: S, expected: usize) -> Result<Vec<T>, DecodeError>
where
    T: DeserializeOwned,
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<BoxError>,
{
    if expected == 0 {
        return Ok(Vec::new());
    }

    let mut reader = ArrayReader::new(stream);
    reader.open().await.map_err(DecodeError::InvalidStartToken)?;

    let mut records = Vec::with_capacity(expected);
    while reader.has_next().await.map_err(DecodeError::InvalidEndToken)? {
        let index = records.len();
        let raw = reader
            .next_element()
            .await
            .map_err(|source| DecodeError::Record { index, source })?;
        let record = serde_json::from_slice(raw).map_err(|e| DecodeError::Record {
            index,
            source: SyntaxError::Json(e),
        })?;
        records.push(record);
    }

    reader.close().await.map_err(DecodeError::InvalidEndToken)?;
    tracing::trace!(records = records.len(), expected, "decoded array");
    Ok(records)
}

const fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Cursor over a chunked byte stream holding one array element at a time.
struct ArrayReader<S> {
    stream: Fuse<S>,
    chunk: Bytes,
    pos: usize,
    element: Vec<u8>,
    seen_element: bool,
}

impl<S, E> ArrayReader<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<BoxError>,
{
    fn new(stream: S) -> Self {
        Self {
            stream: stream.fuse(),
            chunk: Bytes::new(),
            pos: 0,
            element: Vec::new(),
            seen_element: false,
        }
    }

    /// Makes sure at least one unread byte is buffered. Returns false at end
    /// of stream.
    async fn fill(&mut self) -> Result<bool, SyntaxError> {
        while self.pos >= self.chunk.len() {
            match self.stream.next().await {
                Some(Ok(chunk)) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                Some(Err(e)) => return Err(SyntaxError::Read(e.into())),
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Returns the next non-whitespace byte without consuming it.
    async fn peek_token(&mut self) -> Result<Option<u8>, SyntaxError> {
        while self.fill().await? {
            let rest = &self.chunk[self.pos..];
            match rest.iter().position(|b| !is_json_whitespace(*b)) {
                Some(offset) => {
                    self.pos += offset;
                    return Ok(Some(self.chunk[self.pos]));
                }
                None => self.pos = self.chunk.len(),
            }
        }
        Ok(None)
    }

    async fn expect(&mut self, token: u8, expected: &'static str) -> Result<(), SyntaxError> {
        match self.peek_token().await? {
            Some(b) if b == token => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(SyntaxError::Unexpected {
                found: char::from(found),
                expected,
            }),
            None => Err(SyntaxError::UnexpectedEof),
        }
    }

    async fn open(&mut self) -> Result<(), SyntaxError> {
        self.expect(b'[', "'['").await
    }

    /// Returns true while the array has elements left. A closing bracket of
    /// either kind ends the loop so that `close` can report it.
    async fn has_next(&mut self) -> Result<bool, SyntaxError> {
        Ok(!matches!(
            self.peek_token().await?,
            None | Some(b']' | b'}')
        ))
    }

    /// Frames the next element and returns its raw bytes.
    async fn next_element(&mut self) -> Result<&[u8], SyntaxError> {
        if self.seen_element {
            self.expect(b',', "',' or ']'").await?;
            if self.peek_token().await?.is_none() {
                return Err(SyntaxError::UnexpectedEof);
            }
        }
        self.seen_element = true;
        self.element.clear();

        let mut scanner = ValueScanner::default();
        loop {
            if !self.fill().await? {
                // A bare number or literal may run up to the end of the body.
                return if scanner.is_scalar() {
                    Ok(&self.element)
                } else {
                    Err(SyntaxError::UnexpectedEof)
                };
            }
            let available = &self.chunk[self.pos..];
            match scanner.scan(available) {
                Some(len) => {
                    self.element.extend_from_slice(&available[..len]);
                    self.pos += len;
                    return Ok(&self.element);
                }
                None => {
                    self.element.extend_from_slice(available);
                    self.pos = self.chunk.len();
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), SyntaxError> {
        self.expect(b']', "']'").await
    }
}

/// Finds where one JSON value ends without interpreting it.
///
/// Brackets are only counted, not matched; `serde_json` rejects mismatched
/// pairs when the framed bytes are parsed.
#[derive(Debug, Default)]
struct ValueScanner {
    started: bool,
    depth: usize,
    in_string: bool,
    escaped: bool,
    scalar: bool,
}

impl ValueScanner {
    const fn is_scalar(&self) -> bool {
        self.scalar
    }

    /// Feeds the next bytes of the value. Returns the number of bytes that
    /// belong to the value once its end is found.
    fn scan(&mut self, bytes: &[u8]) -> Option<usize> {
        for (i, &b) in bytes.iter().enumerate() {
            if !self.started {
                self.started = true;
                match b {
                    b'{' | b'[' => self.depth = 1,
                    b'"' => self.in_string = true,
                    b',' | b']' | b'}' => return Some(0),
                    _ => self.scalar = true,
                }
                continue;
            }

            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if b == b'\\' {
                    self.escaped = true;
                } else if b == b'"' {
                    self.in_string = false;
                    if self.depth == 0 {
                        return Some(i + 1);
                    }
                }
            } else if self.scalar {
                if is_json_whitespace(b) || matches!(b, b',' | b']' | b'}') {
                    return Some(i);
                }
            } else {
                match b {
                    b'"' => self.in_string = true,
                    b'{' | b'[' => self.depth += 1,
                    b'}' | b']' => {
                        self.depth -= 1;
                        if self.depth == 0 {
                            return Some(i + 1);
                        }
                    }
                    _ => {}
                }
            }
        }
        None
    }
}
