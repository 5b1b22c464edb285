//! Streaming text output for event-stream and chunked responses.

use std::pin::pin;

use futures_util::{Stream, StreamExt};
use tracing::{debug, trace};

use super::output::OutputSink;
use crate::error::{BoxError, HttpError};

/// Incremental UTF-8 decoder for a chunked byte stream.
///
/// A multi-byte character split across two chunks is held back until the
/// rest arrives; invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    /// Creates a decoder with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `chunk`, prefixed by any bytes held back from the previous call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    // valid_up_to guarantees this prefix is UTF-8
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flushes bytes still held back at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Writes each body chunk to `out` as soon as it arrives.
///
/// The stream is consumed once and dropped on every exit path, which
/// releases the underlying connection.
///
/// # Errors
///
/// - [`HttpError::Streaming`] if the body stream yields an error
/// - [`HttpError::Output`] if `out` rejects a write
pub async fn stream_text<S, B, E, O>(body: S, out: &mut O) -> Result<u64, HttpError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<BoxError>,
    O: OutputSink + ?Sized,
{
    let mut body = pin!(body);
    let mut decoder = Utf8ChunkDecoder::new();
    let mut received: u64 = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| {
            debug!(received, "stream read failed");
            HttpError::streaming(e)
        })?;
        let bytes = chunk.as_ref();
        received = received.saturating_add(bytes.len() as u64);
        trace!(chunk = bytes.len(), received, "stream chunk");

        let text = decoder.decode(bytes);
        if !text.is_empty() {
            out.chunk(&text).map_err(HttpError::output)?;
        }
    }

    if let Some(tail) = decoder.finish() {
        out.chunk(&tail).map_err(HttpError::output)?;
    }

    debug!(received, "stream finished");
    Ok(received)
}
