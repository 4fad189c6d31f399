// Orchestrator state module
// Run lifecycle, progress, the read-only state view and change events

pub mod events;
pub mod progress;
pub mod run_state;
pub mod view;

pub use events::OrchestratorEvent;
pub use progress::ProgressData;
pub use run_state::{RunState, RunTrigger};
pub use view::OrchestratorState;
