// Orchestrator state
// Owned by one ExecutionOrchestrator; handed out read-only through state().

use crate::error::OrchestratorError;
use crate::model::{Collaborator, ComparisonResult, RunResult, SavedResult};
use crate::state::{ProgressData, RunState, RunTrigger};

/// Everything a presentation layer reads about the orchestrator
#[derive(Debug, Clone, Default)]
pub struct OrchestratorState {
    pub(crate) run_state: RunState,
    pub(crate) progress: ProgressData,
    pub(crate) result: Option<RunResult>,
    pub(crate) roster: Vec<Collaborator>,
    pub(crate) last_error: Option<OrchestratorError>,
    pub(crate) comparison: Option<ComparisonResult>,
    pub(crate) comparison_pending: bool,
    pub(crate) saved_results: Vec<SavedResult>,
}

impl OrchestratorState {
    /// Current lifecycle state
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Progress of the current (or last) run
    pub fn progress(&self) -> &ProgressData {
        &self.progress
    }

    /// Result of the current run, present only in `Complete`
    pub fn result(&self) -> Option<&RunResult> {
        match self.run_state {
            RunState::Complete => self.result.as_ref(),
            _ => None,
        }
    }

    /// Last successful result, kept across later runs until one succeeds
    pub fn last_result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    /// Collaborators of the run that produced [`last_result`](Self::last_result)
    pub fn roster(&self) -> &[Collaborator] {
        &self.roster
    }

    /// Error that ended the last failed run
    pub fn last_error(&self) -> Option<&OrchestratorError> {
        self.last_error.as_ref()
    }

    /// Last comparison document
    pub fn comparison(&self) -> Option<&ComparisonResult> {
        self.comparison.as_ref()
    }

    /// Whether a comparison request is outstanding
    pub fn is_comparison_pending(&self) -> bool {
        self.comparison_pending
    }

    /// Saved results as last listed
    pub fn saved_results(&self) -> &[SavedResult] {
        &self.saved_results
    }

    /// Whether a run is in flight
    pub fn is_loading(&self) -> bool {
        self.run_state.is_in_flight()
    }

    /// Whether progress should be displayed
    pub fn is_progress_visible(&self) -> bool {
        self.run_state.is_in_flight()
    }

    /// Whether the finalize fetch is outstanding
    pub fn is_finalizing(&self) -> bool {
        self.run_state == RunState::Finalizing
    }

    /// Apply a trigger to the run state
    ///
    /// # Returns
    /// * `Some(previous)` - The trigger was accepted (the state may be unchanged)
    /// * `None` - The trigger is not valid in the current state
    pub(crate) fn apply(&mut self, trigger: RunTrigger) -> Option<RunState> {
        let previous = self.run_state;
        let next = previous.on(trigger)?;
        self.run_state = next;
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = OrchestratorState::default();
        assert_eq!(state.run_state(), RunState::Idle);
        assert_eq!(*state.progress(), ProgressData::initial());
        assert!(state.result().is_none());
        assert!(!state.is_loading());
        assert!(!state.is_progress_visible());
        assert!(!state.is_finalizing());
    }

    #[test]
    fn test_result_visible_only_when_complete() {
        let mut state = OrchestratorState {
            run_state: RunState::Complete,
            result: Some(RunResult {
                best_fitness: 3.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(state.result().map(|r| r.best_fitness), Some(3.0));

        state.apply(RunTrigger::Run);
        assert!(state.result().is_none());
        assert_eq!(state.last_result().map(|r| r.best_fitness), Some(3.0));
    }

    #[test]
    fn test_flags_follow_state() {
        let mut state = OrchestratorState::default();
        state.apply(RunTrigger::Run);
        state.apply(RunTrigger::StreamOpened);
        state.apply(RunTrigger::CompleteFrame);
        assert!(state.is_loading());
        assert!(state.is_progress_visible());
        assert!(state.is_finalizing());

        state.apply(RunTrigger::FinalizeFailed);
        assert!(!state.is_loading());
        assert!(!state.is_progress_visible());
        assert!(!state.is_finalizing());
    }

    #[test]
    fn test_rejected_trigger_leaves_state() {
        let mut state = OrchestratorState::default();
        assert_eq!(state.apply(RunTrigger::FinalizeSucceeded), None);
        assert_eq!(state.run_state(), RunState::Idle);
    }
}
