//! Streaming response pipeline.
//!
//! Turns SSE data payloads into decoded [`ChatResponse`] chunks. The pipeline
//! is pull-driven: nothing is read from the body until the consumer polls,
//! and no chunk is decoded ahead of demand.

use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use crate::client::ClientError;
use crate::model::ChatResponse;

/// Lazy, single-pass sequence of response chunks from one streaming call.
///
/// Dropping it stops reading and releases the underlying connection.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatResponse, ClientError>> + Send>>;

/// Decode one `data: ` payload.
pub fn decode_chunk(payload: &str) -> Result<ChatResponse, ClientError> {
    serde_json::from_str(payload).map_err(ClientError::Decoding)
}

/// Decode each payload into a [`ChatResponse`].
///
/// The first error (transport or decoding) is yielded and ends the stream;
/// the payload source is dropped at that point.
pub fn chat_stream<S>(payloads: S) -> ChatStream
where
    S: Stream<Item = Result<String, ClientError>> + Send + 'static,
{
    Box::pin(stream::unfold(Some(Box::pin(payloads)), |state| async move {
        let Some(mut payloads) = state else {
            return None;
        };
        let Some(item) = payloads.next().await else {
            return None;
        };

        match item.and_then(|payload| decode_chunk(&payload)) {
            Ok(response) => {
                debug!(
                    chat_id = response.chat_id(),
                    stream_finished = ?response.stream_finished(),
                    "Received stream chunk"
                );
                Some((Ok(response), Some(payloads)))
            }
            Err(e) => {
                warn!(error = %e, "Stream terminated");
                Some((Err(e), None))
            }
        }
    }))
}
