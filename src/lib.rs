//! Roadmap Orchestrator Library
//!
//! Client-side orchestration of roadmap optimization runs (genetic algorithm
//! or ant-colony optimization) against the roadmap server: progress streaming,
//! result finalization, algorithm comparison and saved results.
//!
//! The entry point is [`ExecutionOrchestrator`]; a developer smoke utility is
//! in `src/bin/run_roadmap.rs`.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod protocol;
/// Orchestrator state
///
/// Run lifecycle, progress, the read-only state view and change events.
pub mod state;
pub mod transport;

pub use config::Config;
pub use error::{OrchestratorError, StoreError};
pub use orchestrator::ExecutionOrchestrator;
