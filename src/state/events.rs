//! Orchestrator change notifications
//!
//! Pushed over a `tokio::sync::broadcast` channel so a presentation layer can
//! follow a run without polling. Serialized with a `type` tag.

use crate::state::{ProgressData, RunState};
use serde::Serialize;

/// Observable change in orchestrator state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrchestratorEvent {
    /// The run state moved
    StateChanged {
        /// Previous state
        from: RunState,
        /// New state
        to: RunState,
    },
    /// A progress frame was applied
    Progress {
        /// Progress after the update
        progress: ProgressData,
    },
    /// The run ended in `Failed`
    RunFailed {
        /// Error message, verbatim
        message: String,
    },
    /// A result became available
    RunCompleted {
        /// Best fitness of the result
        best_fitness: f64,
    },
}
