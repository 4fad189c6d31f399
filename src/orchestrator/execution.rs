//! Execution orchestrator
//!
//! Drives one optimization run through its two-phase protocol: a streamed
//! POST reporting progress, then a plain POST (finalize) returning the full
//! result. Every state change is applied through the
//! [`RunState`](crate::state::RunState) table and published on a broadcast
//! channel.

use crate::config::{Config, EndpointConfig};
use crate::error::OrchestratorError;
use crate::model::{CollaboratorDirectory, ExecutionRequest, RunResult};
use crate::orchestrator::comparison::ComparisonRunner;
use crate::orchestrator::store::{HttpResultStore, ResultStore};
use crate::protocol::{progress_events, ProgressEvent};
use crate::state::{OrchestratorEvent, OrchestratorState, ProgressData, RunTrigger};
use crate::transport::{ByteStream, HttpTransport, Transport, TransportError};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Client-side owner of run, comparison and saved-result state
///
/// Operations take `&mut self`, so at most one of them is in flight per
/// instance. Dropping a `run` future abandons the run; the next `run` marks
/// it failed before starting.
pub struct ExecutionOrchestrator {
    pub(super) transport: Arc<dyn Transport>,
    pub(super) store: Arc<dyn ResultStore>,
    pub(super) comparison: ComparisonRunner,
    pub(super) endpoints: EndpointConfig,
    pub(super) state: OrchestratorState,
    pub(super) events: broadcast::Sender<OrchestratorEvent>,
}

impl ExecutionOrchestrator {
    /// Create an orchestrator over the given collaborators
    ///
    /// # Arguments
    /// * `transport` - Network capability used for runs and comparisons
    /// * `store` - Saved-results persistence
    /// * `endpoints` - Endpoint paths
    /// * `event_capacity` - Buffer size of the event channel (at least 1)
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn ResultStore>,
        endpoints: EndpointConfig,
        event_capacity: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        let comparison = ComparisonRunner::new(transport.clone(), endpoints.comparison.clone());
        Self {
            transport,
            store,
            comparison,
            endpoints,
            state: OrchestratorState::default(),
            events,
        }
    }

    /// Create an orchestrator talking HTTP to the configured server
    ///
    /// # Errors
    /// * Returns `TransportError::Connection` if the HTTP client cannot be built
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.transport)?);
        let store = Arc::new(HttpResultStore::new(
            transport.clone(),
            config.endpoints.saved_results.clone(),
        ));
        Ok(Self::new(
            transport,
            store,
            config.endpoints.clone(),
            config.event_capacity,
        ))
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    /// Subscribe to state changes published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<OrchestratorEvent> {
        self.events.subscribe()
    }

    /// Execute one optimization run
    ///
    /// Resolves the roster against `directory`, streams progress from the
    /// algorithm's stream endpoint, and on `complete` fetches the full result
    /// from its finalize endpoint with the same payload.
    ///
    /// # Arguments
    /// * `request` - Algorithm, hyperparameters and selection for this run
    /// * `directory` - Collaborators the selection is resolved against
    ///
    /// # Returns
    /// * `Ok(RunResult)` - The finalized result; state is `Complete`
    /// * `Err(OrchestratorError)` - The run failed; state is `Failed` and
    ///   the previous result is retained
    pub async fn run(
        &mut self,
        request: &ExecutionRequest,
        directory: &CollaboratorDirectory,
    ) -> Result<RunResult, OrchestratorError> {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!(
            "run",
            run_id = %run_id,
            algorithm = %request.algorithm(),
        );
        self.run_inner(request, directory).instrument(span).await
    }

    async fn run_inner(
        &mut self,
        request: &ExecutionRequest,
        directory: &CollaboratorDirectory,
    ) -> Result<RunResult, OrchestratorError> {
        self.abandon_stale_run();

        let roster = directory.resolve_roster(request);
        let payload = match serde_json::to_value(request.payload(&roster)) {
            Ok(payload) => payload,
            Err(e) => {
                let error = OrchestratorError::Encode(e.to_string());
                error!(error = %error, "Run rejected");
                self.state.last_error = Some(error.clone());
                return Err(error);
            }
        };
        let endpoints = self.endpoints.for_algorithm(request.algorithm()).clone();

        self.transition(RunTrigger::Run);
        self.state.last_error = None;
        self.set_progress(ProgressData::initial());

        info!(
            endpoint = %endpoints.stream,
            projects = request.project_ids.len(),
            collaborators = roster.len(),
            simulated_members = request.simulated_members.len(),
            "Starting run"
        );

        let body = self
            .transport
            .post_stream(&endpoints.stream, &payload)
            .await
            .map_err(|e| self.fail(RunTrigger::TransportFailed, e.into()))?;
        self.transition(RunTrigger::StreamOpened);

        self.read_progress(body).await?;

        debug!(endpoint = %endpoints.finalize, "Stream complete, fetching result");
        let value = self
            .transport
            .post_json(&endpoints.finalize, &payload)
            .await
            .map_err(|e| self.fail(RunTrigger::FinalizeFailed, e.into()))?;
        let result: RunResult = serde_json::from_value(value).map_err(|e| {
            self.fail(
                RunTrigger::FinalizeFailed,
                OrchestratorError::InvalidResult(e.to_string()),
            )
        })?;

        self.state.result = Some(result.clone());
        self.state.roster = roster;
        self.transition(RunTrigger::FinalizeSucceeded);
        self.publish(OrchestratorEvent::RunCompleted {
            best_fitness: result.best_fitness,
        });

        info!(
            best_fitness = result.best_fitness,
            tasks = result.tasks.len(),
            "Run completed"
        );
        Ok(result)
    }

    /// Apply progress frames until `complete`; the rest of the body is dropped
    async fn read_progress(&mut self, body: ByteStream) -> Result<(), OrchestratorError> {
        let events = progress_events(body);
        futures_util::pin_mut!(events);

        while let Some(event) = events.next().await {
            match event {
                Ok(ProgressEvent::Progress {
                    current,
                    total,
                    best_fitness,
                }) => {
                    self.transition(RunTrigger::ProgressFrame);
                    self.set_progress(ProgressData::from_frame(current, total, best_fitness));
                }
                Ok(ProgressEvent::Complete) => {
                    self.transition(RunTrigger::CompleteFrame);
                    return Ok(());
                }
                Ok(ProgressEvent::Error { message }) => {
                    return Err(self.fail(
                        RunTrigger::ErrorFrame,
                        OrchestratorError::Protocol(message),
                    ));
                }
                Err(error @ OrchestratorError::Transport(_)) => {
                    return Err(self.fail(RunTrigger::TransportFailed, error));
                }
                Err(error) => return Err(self.fail(RunTrigger::StreamFailed, error)),
            }
        }

        Err(self.fail(RunTrigger::StreamFailed, OrchestratorError::StreamEnded))
    }

    /// Mark a run whose future was dropped mid-flight as failed
    pub(super) fn abandon_stale_run(&mut self) {
        if self.state.run_state.is_in_flight() {
            warn!(
                state = %self.state.run_state,
                "Previous run was dropped before finishing"
            );
            self.fail(RunTrigger::Abandoned, OrchestratorError::Abandoned);
        }
    }

    pub(super) fn transition(&mut self, trigger: RunTrigger) {
        match self.state.apply(trigger) {
            Some(from) if from != self.state.run_state => {
                let to = self.state.run_state;
                debug!(from = %from, to = %to, "Run state changed");
                self.publish(OrchestratorEvent::StateChanged { from, to });
            }
            Some(_) => {}
            None => {
                warn!(
                    state = %self.state.run_state,
                    trigger = ?trigger,
                    "Ignoring trigger not valid in current state"
                );
            }
        }
    }

    fn set_progress(&mut self, progress: ProgressData) {
        self.state.progress = progress;
        self.publish(OrchestratorEvent::Progress { progress });
    }

    /// Record a run failure and hand the error back for propagation
    fn fail(&mut self, trigger: RunTrigger, error: OrchestratorError) -> OrchestratorError {
        error!(error = %error, state = %self.state.run_state, "Run failed");
        self.transition(trigger);
        self.state.last_error = Some(error.clone());
        self.publish(OrchestratorEvent::RunFailed {
            message: error.to_string(),
        });
        error
    }

    pub(super) fn publish(&self, event: OrchestratorEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
