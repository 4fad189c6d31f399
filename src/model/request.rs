//! Run request types
//!
//! [`ExecutionRequest`] is what a caller submits; [`RunPayload`] is the JSON
//! body actually sent to the stream and finalize endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Project identifier
pub type ProjectId = i64;

/// Collaborator identifier
pub type CollaboratorId = i64;

/// Role (cargo) identifier
pub type RoleId = i64;

/// Optimization algorithm run by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Genetic algorithm
    #[serde(alias = "GA")]
    Ga,
    /// Ant-colony optimization
    #[serde(alias = "ACO")]
    Aco,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Ga => write!(f, "ga"),
            AlgorithmKind::Aco => write!(f, "aco"),
        }
    }
}

fn default_ref_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Genetic algorithm hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaParams {
    /// Population size
    #[serde(rename = "tam_pop")]
    pub population_size: u32,
    /// Number of generations
    #[serde(rename = "n_gen")]
    pub generations: u32,
    /// Crossover probability
    #[serde(rename = "pc")]
    pub crossover_rate: f64,
    /// Mutation probability
    #[serde(rename = "pm")]
    pub mutation_rate: f64,
    /// Day zero of the schedule
    pub ref_date: NaiveDate,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 100,
            crossover_rate: 0.7,
            mutation_rate: 0.3,
            ref_date: default_ref_date(),
        }
    }
}

/// Ant-colony optimization hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoParams {
    /// Number of ants per iteration
    #[serde(rename = "tam_pop")]
    pub ants: u32,
    /// Number of iterations
    #[serde(rename = "n_gen")]
    pub iterations: u32,
    /// Pheromone weight
    pub alpha: f64,
    /// Heuristic weight
    pub beta: f64,
    /// Pheromone evaporation rate
    pub rho: f64,
    /// Day zero of the schedule
    pub ref_date: NaiveDate,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            ants: 50,
            iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            rho: 0.5,
            ref_date: default_ref_date(),
        }
    }
}

/// Algorithm selector together with its hyperparameters
///
/// Serialized with an `algorithm` tag (`"ga"` / `"aco"`) next to the
/// hyperparameter fields, which is how the server expects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum AlgorithmParams {
    /// Genetic algorithm run
    #[serde(alias = "GA")]
    Ga(GaParams),
    /// Ant-colony optimization run
    #[serde(alias = "ACO")]
    Aco(AcoParams),
}

impl AlgorithmParams {
    /// Which algorithm these parameters configure
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            AlgorithmParams::Ga(_) => AlgorithmKind::Ga,
            AlgorithmParams::Aco(_) => AlgorithmKind::Aco,
        }
    }

    /// Reference date of the run
    pub fn ref_date(&self) -> NaiveDate {
        match self {
            AlgorithmParams::Ga(params) => params.ref_date,
            AlgorithmParams::Aco(params) => params.ref_date,
        }
    }
}

/// A collaborator as known by the server
///
/// Only `id` and `nome` are interpreted; every other field the server sent is
/// kept verbatim so a roster snapshot can be stored and restored losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Collaborator identifier
    pub id: CollaboratorId,
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Remaining fields (role, skills, squad, absences, ...)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Collaborator {
    /// Create a collaborator with no extra details
    pub fn new(id: CollaboratorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            details: Map::new(),
        }
    }
}

/// Collaborators a run resolves its selection against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorDirectory {
    /// Members of the current squad
    #[serde(default)]
    pub squad: Vec<Collaborator>,
    /// Every active collaborator (source of cross-team picks)
    #[serde(default)]
    pub everyone: Vec<Collaborator>,
}

impl CollaboratorDirectory {
    /// Resolve the roster used by a run
    ///
    /// Squad members selected in `collaborator_ids` come first, followed by
    /// cross-team members selected in `cross_team_ids`, each in directory
    /// order. Ids missing from the directory are dropped.
    pub fn resolve_roster(&self, request: &ExecutionRequest) -> Vec<Collaborator> {
        let squad = self
            .squad
            .iter()
            .filter(|c| request.collaborator_ids.contains(&c.id));
        let cross_team = self
            .everyone
            .iter()
            .filter(|c| request.cross_team_ids.contains(&c.id));
        squad.chain(cross_team).cloned().collect()
    }
}

/// Role reference (cargo)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier
    pub id: RoleId,
    /// Role name
    #[serde(rename = "nome")]
    pub name: String,
}

/// Skill reference (habilidade)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill identifier, when known
    #[serde(default)]
    pub id: Option<i64>,
    /// Skill name
    #[serde(rename = "nome")]
    pub name: String,
}

/// Hypothetical, not-yet-hired team member added to a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedMember {
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Role the member would fill
    #[serde(rename = "cargo")]
    pub role: Role,
    /// Skills the member would bring
    #[serde(rename = "habilidades", default)]
    pub skills: Vec<Skill>,
    /// First day the member is available
    #[serde(rename = "inicio", default)]
    pub start: Option<NaiveDate>,
    /// Last day the member is available
    #[serde(rename = "termino", default)]
    pub end: Option<NaiveDate>,
}

/// Simulated member as sent in a run payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedMemberPayload {
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Role identifier
    #[serde(rename = "cargo_id")]
    pub role_id: RoleId,
    /// Skill names
    #[serde(rename = "habilidade_names")]
    pub skill_names: Vec<String>,
    /// First day the member is available
    #[serde(rename = "inicio")]
    pub start: Option<NaiveDate>,
    /// Last day the member is available
    #[serde(rename = "termino")]
    pub end: Option<NaiveDate>,
}

impl From<&SimulatedMember> for SimulatedMemberPayload {
    fn from(member: &SimulatedMember) -> Self {
        Self {
            name: member.name.clone(),
            role_id: member.role.id,
            skill_names: member.skills.iter().map(|s| s.name.clone()).collect(),
            start: member.start,
            end: member.end,
        }
    }
}

/// Immutable input to one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Algorithm selector and hyperparameters
    pub params: AlgorithmParams,
    /// Selected projects
    #[serde(default)]
    pub project_ids: Vec<ProjectId>,
    /// Selected members of the current squad
    #[serde(default)]
    pub collaborator_ids: Vec<CollaboratorId>,
    /// Selected members of other squads
    #[serde(default)]
    pub cross_team_ids: Vec<CollaboratorId>,
    /// Hypothetical members added to the roster
    #[serde(default)]
    pub simulated_members: Vec<SimulatedMember>,
}

impl ExecutionRequest {
    /// Create a request with no selection
    pub fn new(params: AlgorithmParams) -> Self {
        Self {
            params,
            project_ids: Vec::new(),
            collaborator_ids: Vec::new(),
            cross_team_ids: Vec::new(),
            simulated_members: Vec::new(),
        }
    }

    /// Algorithm this request runs
    pub fn algorithm(&self) -> AlgorithmKind {
        self.params.kind()
    }

    /// Build the request body for the given resolved roster
    pub fn payload(&self, roster: &[Collaborator]) -> RunPayload {
        RunPayload {
            params: self.params.clone(),
            project_ids: self.project_ids.clone(),
            collaborator_ids: roster.iter().map(|c| c.id).collect(),
            simulated_members: self.simulated_members.iter().map(Into::into).collect(),
        }
    }
}

/// JSON body of the stream and finalize requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunPayload {
    /// Algorithm selector and hyperparameters, flattened into the body
    #[serde(flatten)]
    pub params: AlgorithmParams,
    /// Selected projects
    #[serde(rename = "projeto_ids")]
    pub project_ids: Vec<ProjectId>,
    /// Resolved roster ids (squad and cross-team)
    #[serde(rename = "colaborador_ids")]
    pub collaborator_ids: Vec<CollaboratorId>,
    /// Hypothetical members
    pub simulated_members: Vec<SimulatedMemberPayload>,
}
