//! Server-Sent Events (SSE) line framing.
//!
//! The service frames every stream chunk as one `data: ` line:
//! ```text
//! data: {"newMessage": {...}, "chatId": "c1"}
//!
//! : keep-alive
//! data: {"newMessage": {...}, "chatId": "c1", "streamFinished": true}
//! ```
//! Lines without the `data: ` prefix carry nothing and are skipped.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::client::ClientError;

/// Extension trait for `reqwest::Response` to enable SSE streaming.
///
/// # Example
/// ```ignore
/// use easybeam::sse::SSEResponseExt;
///
/// let response = client.post(url).send().await?;
///
/// let mut stream = response.sse();
/// while let Some(result) = stream.next().await {
///     let payload = result?;
///     println!("SSE data: {}", payload);
/// }
/// ```
pub trait SSEResponseExt {
    /// Convert the response into a stream of SSE data payloads.
    ///
    /// Returns the content after the `data: ` prefix for each data line.
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send;
}

impl SSEResponseExt for reqwest::Response {
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send {
        sse_data(self.bytes_stream())
    }
}

/// Split a byte stream into lines and yield the payload of each `data: ` line.
///
/// Lines end with `\n`, `\r\n` or a bare `\r`. Bytes are only pulled from
/// `byte_stream` when no complete line is buffered. A final line without a
/// terminator is still processed when the body ends. A transport error is
/// yielded once and ends the stream.
pub fn sse_data<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, ClientError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<ClientError> + Send,
{
    stream::unfold(
        (Box::pin(byte_stream), LineBuffer::default(), false),
        |(mut byte_stream, mut lines, mut stream_ended)| async move {
            loop {
                // Drain complete lines already buffered
                while let Some(line) = lines.next_line() {
                    if let Some(data) = data_payload(&line) {
                        return Some((Ok(data), (byte_stream, lines, stream_ended)));
                    }
                }

                if stream_ended {
                    let Some(line) = lines.take_rest() else {
                        return None;
                    };
                    return data_payload(&line)
                        .map(|data| (Ok(data), (byte_stream, lines, stream_ended)));
                }

                match byte_stream.next().await {
                    Some(Ok(chunk)) => lines.push(&chunk),
                    Some(Err(e)) => {
                        lines = LineBuffer::default();
                        return Some((Err(e.into()), (byte_stream, lines, true)));
                    }
                    None => stream_ended = true,
                }
            }
        },
    )
}

/// Accumulates body bytes and splits off complete lines.
#[derive(Debug, Default)]
struct LineBuffer {
    buf: Vec<u8>,
    /// Bytes already searched for a terminator.
    scanned: usize,
    /// The last line ended with `\r` at the end of the buffer; a `\n`
    /// arriving next belongs to it.
    skip_lf: bool,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Remove and return the next complete line, without its terminator.
    fn next_line(&mut self) -> Option<Vec<u8>> {
        if self.skip_lf && !self.buf.is_empty() {
            if self.buf[0] == b'\n' {
                self.buf.remove(0);
            }
            self.skip_lf = false;
        }

        let offset = self.scanned.min(self.buf.len());
        let Some(found) = self.buf[offset..]
            .iter()
            .position(|b| *b == b'\n' || *b == b'\r')
        else {
            self.scanned = self.buf.len();
            return None;
        };
        let pos = offset + found;

        let terminator_len = match (self.buf[pos], self.buf.get(pos + 1)) {
            (b'\r', Some(b'\n')) => 2,
            (b'\r', None) => {
                self.skip_lf = true;
                1
            }
            _ => 1,
        };

        let mut line: Vec<u8> = self.buf.drain(..pos + terminator_len).collect();
        line.truncate(pos);
        self.scanned = 0;
        Some(line)
    }

    /// Take an unterminated final line, if any bytes remain.
    fn take_rest(&mut self) -> Option<Vec<u8>> {
        self.scanned = 0;
        if self.buf.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.buf))
    }
}

/// Decode one line into a data payload.
fn data_payload(line: &[u8]) -> Option<String> {
    parse_sse_line(&String::from_utf8_lossy(line)).map(str::to_string)
}

/// Parse an SSE line to extract the data portion.
///
/// SSE lines are in the format: `data: <content>`
///
/// # Example
/// ```
/// use easybeam::sse::parse_sse_line;
///
/// let line = "data: {\"key\": \"value\"}";
/// assert_eq!(parse_sse_line(line), Some("{\"key\": \"value\"}"));
///
/// let line = ": keep-alive";
/// assert_eq!(parse_sse_line(line), None);
/// ```
pub fn parse_sse_line(line: &str) -> Option<&str> {
    line.strip_prefix("data: ").map(|s| s.trim())
}
