//! Algorithm comparison
//!
//! One request/response call that runs both algorithms server-side and
//! returns a side-by-side document.

use crate::error::OrchestratorError;
use crate::model::{ComparisonRequest, ComparisonResult};
use crate::orchestrator::ExecutionOrchestrator;
use crate::transport::Transport;
use std::sync::Arc;

/// Issues comparison requests
#[derive(Clone)]
pub struct ComparisonRunner {
    transport: Arc<dyn Transport>,
    path: String,
}

impl ComparisonRunner {
    /// Create a runner posting to `path`
    pub fn new(transport: Arc<dyn Transport>, path: impl Into<String>) -> Self {
        Self {
            transport,
            path: path.into(),
        }
    }

    /// Compare both algorithms on the same inputs
    ///
    /// # Arguments
    /// * `request` - Reference date and hyperparameters of each algorithm
    ///
    /// # Returns
    /// * `Ok(ComparisonResult)` - The server's comparison document, untouched
    /// * `Err(OrchestratorError)` - If the request cannot be encoded or the call fails
    pub async fn compare(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult, OrchestratorError> {
        let body =
            serde_json::to_value(request).map_err(|e| OrchestratorError::Encode(e.to_string()))?;

        tracing::debug!(path = %self.path, ref_date = %request.ref_date, "Requesting comparison");
        let value = self.transport.post_json(&self.path, &body).await?;
        Ok(ComparisonResult(value))
    }
}

impl ExecutionOrchestrator {
    /// Run a comparison and keep its document in state
    ///
    /// The pending flag is set for the duration of the call. On failure the
    /// previous comparison is kept and the error is returned.
    pub async fn compare(
        &mut self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult, OrchestratorError> {
        self.state.comparison_pending = true;
        let outcome = self.comparison.compare(request).await;
        self.state.comparison_pending = false;

        match outcome {
            Ok(result) => {
                self.state.comparison = Some(result.clone());
                Ok(result)
            }
            Err(error) => {
                tracing::warn!(error = %error, "Comparison failed");
                Err(error)
            }
        }
    }
}
