//! Newline-delimited JSON stream parser.
//!
//! The chat service answers with one JSON record per line. Chunk boundaries
//! from the HTTP body are arbitrary, so the decoder buffers raw bytes until a
//! newline arrives and only then decodes the frame. Buffering bytes (not
//! text) keeps multi-byte UTF-8 characters intact when a chunk splits them.

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use cvchat_types::RawEvent;
use futures_util::Stream;
use serde_json::Value;

use super::error::{ClientError, ClientResult};

/// Max frame characters echoed into debug logs.
const LOG_FRAME_PREVIEW: usize = 120;

/// Incremental frame decoder.
///
/// `push` returns every record completed by the chunk; the trailing partial
/// frame stays buffered for the next chunk.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns the records it completed.
    ///
    /// Malformed frames are dropped; they never abort decoding.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<RawEvent> {
        self.buffer.extend_from_slice(chunk);

        let Some(last_newline) = self.buffer.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };

        let rest = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);

        complete
            .split(|b| *b == b'\n')
            .filter_map(decode_frame)
            .collect()
    }

    /// Bytes waiting for a terminating newline.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Ends decoding.
    ///
    /// A trailing frame without a newline is treated as incomplete and
    /// discarded unparsed. Returns the number of discarded bytes.
    pub fn finish(self) -> usize {
        self.buffer.len()
    }
}

fn decode_frame(frame: &[u8]) -> Option<RawEvent> {
    let text = String::from_utf8_lossy(frame);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Some(RawEvent::from_value(value)),
        Err(err) => {
            let preview: String = trimmed.chars().take(LOG_FRAME_PREVIEW).collect();
            tracing::debug!(error = %err, frame = %preview, "dropping malformed frame");
            None
        }
    }
}

/// Stream adapter turning a byte stream into decoded records.
///
/// A read error from the inner stream is yielded once, after which the
/// stream ends. Records already yielded are unaffected.
pub struct NdjsonStream<S> {
    inner: S,
    decoder: FrameDecoder,
    pending: VecDeque<RawEvent>,
    done: bool,
}

impl<S> NdjsonStream<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: stream,
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<S, E> Stream for NdjsonStream<S>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
    E: fmt::Display,
{
    type Item = ClientResult<RawEvent>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        use std::task::Poll;

        loop {
            if let Some(event) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if self.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let events = self.decoder.push(&chunk);
                    self.pending.extend(events);
                }
                Poll::Ready(Some(Err(e))) => {
                    self.done = true;
                    return Poll::Ready(Some(Err(ClientError::stream(e))));
                }
                Poll::Ready(None) => {
                    self.done = true;
                    let discarded = std::mem::take(&mut self.decoder).finish();
                    if discarded > 0 {
                        tracing::debug!(
                            bytes = discarded,
                            "discarding unterminated trailing frame"
                        );
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
