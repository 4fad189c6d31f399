//! Progress event generator
//!
//! Turns a raw response body into a stream of [`ProgressEvent`]s.

use crate::error::OrchestratorError;
use crate::protocol::decoder::LineDecoder;
use crate::protocol::frame::{parse_frame, ProgressEvent};
use crate::transport::TransportError;
use async_stream::try_stream;
use futures_util::stream::Stream;
use futures_util::StreamExt;

/// Decode a chunked body into progress events, in stream order
///
/// The generator ends after the body is exhausted; an unterminated last line
/// is still decoded. The first transport failure or malformed frame is
/// yielded as an error and ends the stream.
pub fn progress_events<S>(body: S) -> impl Stream<Item = Result<ProgressEvent, OrchestratorError>>
where
    S: Stream<Item = Result<Vec<u8>, TransportError>> + Unpin,
{
    try_stream! {
        let mut body = body;
        let mut decoder = LineDecoder::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for line in decoder.push(&chunk) {
                if let Some(event) = parse_frame(&line)? {
                    yield event;
                }
            }
        }

        if let Some(line) = decoder.finish() {
            if let Some(event) = parse_frame(&line)? {
                yield event;
            }
        }
    }
}
