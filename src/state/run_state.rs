// Run lifecycle state machine
// One table decides every transition; callers only name the trigger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// No run has started yet
    #[default]
    Idle,
    /// Stream request issued, response not yet open
    Submitting,
    /// Reading progress frames
    Streaming,
    /// Stream completed, fetching the full result
    Finalizing,
    /// A result is available
    Complete,
    /// The last run failed
    Failed,
}

/// Event that may move a [`RunState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunTrigger {
    /// `run()` was called
    Run,
    /// The stream response was accepted
    StreamOpened,
    /// A progress frame arrived
    ProgressFrame,
    /// An error frame arrived
    ErrorFrame,
    /// A complete frame arrived
    CompleteFrame,
    /// The stream broke its framing or ended without a terminal frame
    StreamFailed,
    /// The finalize fetch returned a result
    FinalizeSucceeded,
    /// The finalize fetch failed
    FinalizeFailed,
    /// The network failed while a run was in flight
    TransportFailed,
    /// A run future was dropped before reaching a terminal state
    Abandoned,
    /// A saved result was loaded
    Restored,
}

impl RunState {
    /// Target state for `trigger`, or `None` when the trigger is not
    /// accepted in this state
    ///
    /// A duplicate `complete` while finalizing or complete maps to the same
    /// state, so callers can treat it as a no-op.
    pub fn on(self, trigger: RunTrigger) -> Option<RunState> {
        use RunState::*;
        use RunTrigger::*;

        match (self, trigger) {
            (Idle | Complete | Failed, Run) => Some(Submitting),
            (Submitting, StreamOpened) => Some(Streaming),
            (Streaming, ProgressFrame) => Some(Streaming),
            (Streaming, ErrorFrame) => Some(Failed),
            (Streaming, CompleteFrame) => Some(Finalizing),
            (Finalizing | Complete, CompleteFrame) => Some(self),
            (Streaming, StreamFailed) => Some(Failed),
            (Finalizing, FinalizeSucceeded) => Some(Complete),
            (Finalizing, FinalizeFailed) => Some(Failed),
            (Submitting | Streaming | Finalizing, TransportFailed) => Some(Failed),
            (Submitting | Streaming | Finalizing, Abandoned) => Some(Failed),
            (Idle | Complete | Failed, Restored) => Some(Complete),
            _ => None,
        }
    }

    /// Whether a run is between `run()` and a terminal state
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            RunState::Submitting | RunState::Streaming | RunState::Finalizing
        )
    }

    /// Whether the state ends a run
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Complete | RunState::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Submitting => "submitting",
            RunState::Streaming => "streaming",
            RunState::Finalizing => "finalizing",
            RunState::Complete => "complete",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}
