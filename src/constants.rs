//! Orchestrator constants
//!
//! Endpoint paths and stream protocol markers shared across modules.

/// Prefix that marks a payload line in the progress stream
pub const SSE_DATA_PREFIX: &str = "data: ";

/// Frame `type` reported for an incremental progress update
pub const FRAME_TYPE_PROGRESS: &str = "progress";

/// Frame `type` reported once the server-side computation has finished
pub const FRAME_TYPE_COMPLETE: &str = "complete";

/// Streaming endpoint for the genetic algorithm
pub const GA_STREAM_PATH: &str = "/api/executar-algoritmo-stream";

/// Finalize endpoint for the genetic algorithm
pub const GA_FINALIZE_PATH: &str = "/api/executar-algoritmo";

/// Streaming endpoint for ant-colony optimization
pub const ACO_STREAM_PATH: &str = "/api/executar-aco-stream";

/// Finalize endpoint for ant-colony optimization
pub const ACO_FINALIZE_PATH: &str = "/api/executar-aco";

/// Side-by-side comparison endpoint
pub const COMPARISON_PATH: &str = "/api/comparar-algoritmos";

/// Saved-results collection endpoint
pub const SAVED_RESULTS_PATH: &str = "/api/resultados-salvos";

/// Progress reported before the first frame arrives (current, total)
pub const INITIAL_PROGRESS: (u64, u64) = (0, 1);
