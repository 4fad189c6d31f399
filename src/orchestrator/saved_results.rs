//! Saved-result operations
//!
//! List, save, load and delete named runs through the [`ResultStore`].
//! Failures here never fail the caller: they are logged and the previous
//! state is left untouched.
//!
//! [`ResultStore`]: crate::orchestrator::ResultStore

use crate::error::StoreError;
use crate::model::{
    Collaborator, ExecutionRequest, NewSavedResult, ResultFilter, RunResult, SavedParameters,
    SavedResultId, SavedSimulatedMember,
};
use crate::orchestrator::ExecutionOrchestrator;
use crate::state::{OrchestratorEvent, RunTrigger};
use tracing::{debug, error, info};

impl ExecutionOrchestrator {
    /// Reload the saved-results list
    ///
    /// # Arguments
    /// * `filter` - Squad and year to list
    pub async fn refresh_saved(&mut self, filter: ResultFilter) {
        match self.store.list(&filter).await {
            Ok(results) => {
                debug!(count = results.len(), filter = ?filter, "Saved results refreshed");
                self.state.saved_results = results;
            }
            Err(e) => {
                error!(error = %e, filter = ?filter, "Failed to load saved results");
            }
        }
    }

    /// Persist a run under `name`, then refresh the list
    ///
    /// A blank name is ignored without contacting the store. The roadmap end
    /// date is taken from the task that finishes last.
    ///
    /// # Arguments
    /// * `name` - Display name of the saved result
    /// * `request` - Request the run was executed with
    /// * `result` - Run output to store
    /// * `roster` - Collaborators the run used
    /// * `scope` - Squad and year the result belongs to
    ///
    /// # Returns
    /// * `Some(id)` - The result was saved
    /// * `None` - The name was blank or the store failed
    pub async fn save_result(
        &mut self,
        name: &str,
        request: &ExecutionRequest,
        result: &RunResult,
        roster: &[Collaborator],
        scope: ResultFilter,
    ) -> Option<SavedResultId> {
        if name.trim().is_empty() {
            debug!("Ignoring save with a blank name");
            return None;
        }

        let roadmap_end_date = result.roadmap_end_date();
        let record = NewSavedResult {
            name: name.to_string(),
            algorithm: request.algorithm(),
            roadmap_end_date,
            squad_id: scope.squad_id,
            year: scope.year,
            result: result.clone(),
            parameters: SavedParameters {
                params: request.params.clone(),
                project_ids: request.project_ids.clone(),
                collaborator_ids: roster.iter().map(|c| c.id).collect(),
                roadmap_end_date,
                saved_collaborators: Some(roster.to_vec()),
                simulated_members: request
                    .simulated_members
                    .iter()
                    .map(SavedSimulatedMember::from)
                    .collect(),
            },
        };

        match self.store.create(&record).await {
            Ok(id) => {
                info!(
                    id = id,
                    name = %name,
                    roadmap_end_date = ?roadmap_end_date,
                    "Result saved"
                );
                self.refresh_saved(scope).await;
                Some(id)
            }
            Err(e) => {
                error!(error = %e, name = %name, "Failed to save result");
                None
            }
        }
    }

    /// Restore a saved result as the current result
    ///
    /// The state becomes `Complete`. The roster is replaced by the stored
    /// snapshot whenever one was stored, even an empty one.
    ///
    /// # Returns
    /// * `Some(SavedParameters)` - Stored parameters, for rebuilding the selection
    /// * `None` - The record could not be fetched or has no parameters
    pub async fn load_saved(&mut self, id: SavedResultId) -> Option<SavedParameters> {
        let saved = match self.store.get(id).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(error = %e, id = id, "Failed to load saved result");
                return None;
            }
        };

        let Some(parameters) = saved.parameters.clone() else {
            let e = StoreError::MissingParameters(id);
            error!(error = %e, id = id, "Failed to load saved result");
            return None;
        };

        self.abandon_stale_run();

        let result = saved.run_result();
        let best_fitness = result.best_fitness;
        self.state.result = Some(result);
        if let Some(roster) = &parameters.saved_collaborators {
            self.state.roster = roster.clone();
        }
        self.state.last_error = None;
        self.transition(RunTrigger::Restored);
        self.publish(OrchestratorEvent::RunCompleted { best_fitness });

        info!(id = id, name = %saved.name, algorithm = %saved.algorithm, "Saved result restored");
        Some(parameters)
    }

    /// Delete a saved result, then refresh the list
    ///
    /// # Returns
    /// * `true` - The result was deleted
    /// * `false` - The store failed; the list is unchanged
    pub async fn delete_saved(&mut self, id: SavedResultId, filter: ResultFilter) -> bool {
        match self.store.delete(id).await {
            Ok(()) => {
                info!(id = id, "Saved result deleted");
                self.refresh_saved(filter).await;
                true
            }
            Err(e) => {
                error!(error = %e, id = id, "Failed to delete saved result");
                false
            }
        }
    }
}
