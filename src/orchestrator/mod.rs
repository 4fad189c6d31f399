//! Orchestrator module
//!
//! [`ExecutionOrchestrator`] owns the client-side state of roadmap runs.
//! Its operations are split by concern: runs in `execution`, comparisons in
//! `comparison` and saved results in `saved_results`, with persistence behind
//! the [`ResultStore`] capability.

pub mod comparison;
pub mod execution;
pub mod saved_results;
pub mod store;

pub use comparison::ComparisonRunner;
pub use execution::ExecutionOrchestrator;
pub use store::{HttpResultStore, ResultStore};
