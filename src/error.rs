//! Error types for the orchestrator
//!
//! Two families, matching the two ways failures are handled:
//! [`OrchestratorError`] is returned to the caller and ends a run in `Failed`;
//! [`StoreError`] is raised by the saved-results collaborator and is logged
//! and absorbed by the orchestrator.

use crate::model::SavedResultId;
use crate::transport::TransportError;
use thiserror::Error;

/// Errors surfaced on the run and comparison paths
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrchestratorError {
    /// Network or connection failure, including a stream that broke off
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server reported an error frame on the progress stream
    #[error("Server reported an error: {0}")]
    Protocol(String),

    /// A `data:` line whose payload is not a valid frame
    #[error("Malformed stream frame ({reason}): {line}")]
    MalformedFrame {
        /// Offending line, as received
        line: String,
        /// Why it could not be decoded
        reason: String,
    },

    /// The stream closed before a `complete` or `error` frame
    #[error("Progress stream ended before the run completed")]
    StreamEnded,

    /// A run future was dropped before the run reached a terminal state
    #[error("Run was abandoned before it finished")]
    Abandoned,

    /// The finalize response is not a valid result document
    #[error("Invalid result document: {0}")]
    InvalidResult(String),

    /// A request body could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

/// Errors raised by a [`ResultStore`](crate::orchestrator::ResultStore)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Network or connection failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The store answered with a document of the wrong shape
    #[error("Invalid saved-result document: {0}")]
    Decode(String),

    /// A request body could not be encoded
    #[error("Failed to encode saved result: {0}")]
    Encode(String),

    /// The stored record has no parameters to restore
    #[error("Saved result {0} has no stored parameters")]
    MissingParameters(SavedResultId),
}
