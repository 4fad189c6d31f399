//! Progress stream frames
//!
//! Each meaningful stream line is `data: <json>`; everything else (blank
//! separators, `:` comments, keep-alives) is skipped.

use crate::constants::{FRAME_TYPE_COMPLETE, FRAME_TYPE_PROGRESS, SSE_DATA_PREFIX};
use crate::error::OrchestratorError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One decoded frame of the progress stream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Iteration update
    Progress {
        /// Current generation/iteration
        current: u64,
        /// Total generations/iterations announced by the server
        total: u64,
        /// Best fitness found so far
        best_fitness: f64,
    },
    /// The server-side computation finished
    Complete,
    /// The server-side computation failed
    Error {
        /// Server-supplied message
        message: String,
    },
}

impl ProgressEvent {
    /// Whether this frame ends the stream
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProgressEvent::Progress { .. })
    }
}

#[derive(Deserialize)]
struct RawFrame {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    generation: Option<u64>,
    #[serde(default)]
    total_generations: Option<u64>,
    #[serde(default)]
    best_fitness: Option<f64>,
}

fn malformed(line: &str, reason: impl Into<String>) -> OrchestratorError {
    OrchestratorError::MalformedFrame {
        line: line.to_string(),
        reason: reason.into(),
    }
}

/// Decode one stream line
///
/// # Returns
/// * `Ok(Some(event))` - The line carried a frame
/// * `Ok(None)` - The line is not a payload line, or a frame type this
///   client does not act on
/// * `Err(OrchestratorError::MalformedFrame)` - The payload is not valid JSON
///   or a progress frame lacks a required field
pub fn parse_frame(line: &str) -> Result<Option<ProgressEvent>, OrchestratorError> {
    let Some(payload) = line.strip_prefix(SSE_DATA_PREFIX) else {
        return Ok(None);
    };

    let raw: RawFrame =
        serde_json::from_str(payload).map_err(|e| malformed(line, e.to_string()))?;

    // An error field wins over any type the frame claims
    match raw.error {
        None | Some(Value::Null) => {}
        Some(Value::String(message)) => return Ok(Some(ProgressEvent::Error { message })),
        Some(other) => {
            return Ok(Some(ProgressEvent::Error {
                message: other.to_string(),
            }))
        }
    }

    match raw.kind.as_deref() {
        Some(FRAME_TYPE_PROGRESS) => Ok(Some(ProgressEvent::Progress {
            current: raw
                .generation
                .ok_or_else(|| malformed(line, "missing generation"))?,
            total: raw
                .total_generations
                .ok_or_else(|| malformed(line, "missing total_generations"))?,
            best_fitness: raw
                .best_fitness
                .ok_or_else(|| malformed(line, "missing best_fitness"))?,
        })),
        Some(FRAME_TYPE_COMPLETE) => Ok(Some(ProgressEvent::Complete)),
        other => {
            tracing::debug!(frame_type = ?other, "Skipping unrecognized frame");
            Ok(None)
        }
    }
}
