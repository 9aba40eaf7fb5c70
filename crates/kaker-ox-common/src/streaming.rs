use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::error::{CommonRequestError, redact};

/// Marker that prefixes a payload-carrying line in a streamed body
pub const DATA_MARKER: &str = "data: ";

/// Sentinel payload some servers send at the end of a stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Type-erased body stream as produced by `reqwest::Response::bytes_stream`
type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Splits a streamed response body into lines as the bytes arrive.
///
/// Only the bytes of the current, unfinished line are buffered. A trailing
/// line without a terminating `\n` is handed out once the transport closes.
pub struct LineDecoder {
    byte_stream: ByteStream,
    buffer: Vec<u8>,
    finished: bool,
}

impl LineDecoder {
    #[must_use]
    pub fn new(response: reqwest::Response) -> Self {
        Self::from_stream(response.bytes_stream())
    }

    /// Decode lines from any byte stream, e.g. a recorded body in tests.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    {
        Self {
            byte_stream: Box::pin(stream),
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// Get the next line of the body, without its line terminator.
    ///
    /// Returns `Ok(None)` once the transport has closed and the buffer is
    /// drained.
    ///
    /// # Errors
    ///
    /// Returns `CommonRequestError::Http` if reading from the transport fails.
    pub async fn next_line(&mut self) -> Result<Option<String>, CommonRequestError> {
        loop {
            if let Some(line) = self.take_line() {
                return Ok(Some(line));
            }

            if self.finished {
                return Ok(None);
            }

            match self.byte_stream.next().await {
                Some(chunk) => {
                    let chunk = chunk.map_err(redact)?;
                    self.buffer.extend_from_slice(&chunk);
                }
                None => {
                    self.finished = true;
                    if !self.buffer.is_empty() {
                        let rest = std::mem::take(&mut self.buffer);
                        return Ok(Some(decode_line(&rest)));
                    }
                }
            }
        }
    }

    /// Pop one complete line off the front of the buffer.
    fn take_line(&mut self) -> Option<String> {
        let pos = self.buffer.iter().position(|&b| b == b'\n')?;
        let line_bytes: Vec<u8> = self.buffer.drain(..=pos).collect();
        Some(decode_line(&line_bytes))
    }
}

/// Strip the line terminator and decode, replacing invalid UTF-8.
fn decode_line(bytes: &[u8]) -> String {
    let line = String::from_utf8_lossy(bytes);
    line.trim_end_matches(['\n', '\r']).to_owned()
}

/// Extract the payload of a `data: ` line.
///
/// Returns `None` for lines without the marker, for an empty payload and for
/// the `[DONE]` sentinel.
#[must_use]
pub fn data_payload(line: &str) -> Option<&str> {
    let payload = line.strip_prefix(DATA_MARKER)?;
    if payload.is_empty() || payload == DONE_SENTINEL {
        return None;
    }
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn decoder(chunks: &[&'static str]) -> LineDecoder {
        let chunks: Vec<Result<Bytes, reqwest::Error>> = chunks
            .iter()
            .map(|c| Ok(Bytes::from_static(c.as_bytes())))
            .collect();
        LineDecoder::from_stream(stream::iter(chunks))
    }

    async fn collect(mut decoder: LineDecoder) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = decoder.next_line().await.unwrap() {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn splits_lines_within_one_chunk() {
        let lines = collect(decoder(&["data: a\ndata: b\n"])).await;
        assert_eq!(lines, vec!["data: a", "data: b"]);
    }

    #[tokio::test]
    async fn joins_lines_split_across_chunks() {
        let lines = collect(decoder(&["da", "ta: {\"x\"", ":1}\n", "\n"])).await;
        assert_eq!(lines, vec!["data: {\"x\":1}", ""]);
    }

    #[tokio::test]
    async fn strips_carriage_returns() {
        let lines = collect(decoder(&["data: a\r\n\r\n"])).await;
        assert_eq!(lines, vec!["data: a", ""]);
    }

    #[tokio::test]
    async fn flushes_unterminated_last_line_on_close() {
        let lines = collect(decoder(&["data: a\n", "data: tail"])).await;
        assert_eq!(lines, vec!["data: a", "data: tail"]);
    }

    #[tokio::test]
    async fn empty_body_yields_nothing() {
        let lines = collect(decoder(&[])).await;
        assert!(lines.is_empty());
    }

    #[test]
    fn data_payload_requires_marker_with_space() {
        assert_eq!(data_payload("data: {}"), Some("{}"));
        assert_eq!(data_payload("data:{}"), None);
        assert_eq!(data_payload("event: message"), None);
        assert_eq!(data_payload(": keep-alive"), None);
    }

    #[test]
    fn data_payload_skips_empty_and_done() {
        assert_eq!(data_payload("data: "), None);
        assert_eq!(data_payload("data: [DONE]"), None);
        assert_eq!(data_payload("data: not-json"), Some("not-json"));
    }
}
