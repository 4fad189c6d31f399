//! HTTP transport module
//!
//! The [`Transport`] capability is everything the orchestrator needs from the
//! network: a streamed POST for progress, JSON request/response calls, and
//! DELETE. [`HttpTransport`] implements it with `reqwest`.

pub mod error;
pub mod http;

pub use error::TransportError;
pub use http::HttpTransport;

use async_trait::async_trait;
use futures_util::stream::Stream;
use serde_json::Value;
use std::pin::Pin;

/// Raw response body delivered chunk by chunk, in arrival order
///
/// Chunk boundaries carry no meaning; a chunk may end in the middle of a line
/// or of a multi-byte character.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, TransportError>> + Send>>;

/// Network capability consumed by the orchestrator
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body and hand back the response body as a chunk stream
    async fn post_stream(&self, path: &str, body: &Value) -> Result<ByteStream, TransportError>;

    /// POST a JSON body and decode the JSON response
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// GET with query parameters and decode the JSON response
    async fn get_json(&self, path: &str, query: &[(&str, String)])
        -> Result<Value, TransportError>;

    /// DELETE the resource at `path`
    async fn delete(&self, path: &str) -> Result<(), TransportError>;
}
