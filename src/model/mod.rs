//! Roadmap API data model
//!
//! Structs that mirror the JSON documents exchanged with the roadmap server.
//! Rust field names are English; wire names are mapped with `serde(rename)`.

pub mod request;
pub mod result;
pub mod saved;

pub use request::{
    AcoParams, AlgorithmKind, AlgorithmParams, Collaborator, CollaboratorDirectory,
    CollaboratorId, ExecutionRequest, GaParams, ProjectId, Role, RoleId, RunPayload,
    SimulatedMember, SimulatedMemberPayload, Skill,
};
pub use result::{ComparisonRequest, ComparisonResult, RunResult, ScheduledTask};
pub use saved::{
    NewSavedResult, ResultFilter, SavedParameters, SavedResult, SavedResultId,
    SavedSimulatedMember, SquadId,
};
