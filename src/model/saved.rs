//! Saved-result types
//!
//! A saved result bundles a run's output with everything needed to
//! reconstitute its context later (parameters, roster, simulated members).

use super::request::{
    AlgorithmKind, AlgorithmParams, Collaborator, CollaboratorId, ProjectId, Role, RoleId,
    SimulatedMember, Skill,
};
use super::result::{RunResult, ScheduledTask};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Saved result identifier
pub type SavedResultId = i64;

/// Squad identifier
pub type SquadId = i64;

/// Filter for listing saved results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultFilter {
    /// Only results of this squad
    pub squad_id: Option<SquadId>,
    /// Only results of this year
    pub year: Option<i32>,
}

impl ResultFilter {
    /// Query parameters understood by the saved-results endpoint
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(squad_id) = self.squad_id {
            query.push(("squad_id", squad_id.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("ano", year.to_string()));
        }
        query
    }
}

/// Simulated member in its stored form (ids and full objects side by side)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSimulatedMember {
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Role identifier
    #[serde(rename = "cargo_id")]
    pub role_id: RoleId,
    /// Full role
    #[serde(rename = "cargo")]
    pub role: Role,
    /// Skill names
    #[serde(rename = "habilidade_names", default)]
    pub skill_names: Vec<String>,
    /// Full skills
    #[serde(rename = "habilidades", default)]
    pub skills: Vec<Skill>,
    /// First day the member is available
    #[serde(rename = "inicio", default)]
    pub start: Option<NaiveDate>,
    /// Last day the member is available
    #[serde(rename = "termino", default)]
    pub end: Option<NaiveDate>,
}

impl From<&SimulatedMember> for SavedSimulatedMember {
    fn from(member: &SimulatedMember) -> Self {
        Self {
            name: member.name.clone(),
            role_id: member.role.id,
            role: member.role.clone(),
            skill_names: member.skills.iter().map(|s| s.name.clone()).collect(),
            skills: member.skills.clone(),
            start: member.start,
            end: member.end,
        }
    }
}

impl From<&SavedSimulatedMember> for SimulatedMember {
    fn from(saved: &SavedSimulatedMember) -> Self {
        Self {
            name: saved.name.clone(),
            role: saved.role.clone(),
            skills: saved.skills.clone(),
            start: saved.start,
            end: saved.end,
        }
    }
}

/// Parameters stored with a saved result (`parametros`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedParameters {
    /// Algorithm selector and hyperparameters
    #[serde(flatten)]
    pub params: AlgorithmParams,
    /// Projects the run covered
    #[serde(rename = "projeto_ids", default)]
    pub project_ids: Vec<ProjectId>,
    /// Collaborator ids sent to the server
    #[serde(rename = "colaborador_ids", default)]
    pub collaborator_ids: Vec<CollaboratorId>,
    /// Derived roadmap end date
    #[serde(default)]
    pub roadmap_end_date: Option<NaiveDate>,
    /// Roster actually used by the run
    #[serde(rename = "saved_colaboradores", default)]
    pub saved_collaborators: Option<Vec<Collaborator>>,
    /// Hypothetical members used by the run
    #[serde(default)]
    pub simulated_members: Vec<SavedSimulatedMember>,
}

impl SavedParameters {
    /// Simulated members converted back to their request form
    pub fn simulated_members(&self) -> Vec<SimulatedMember> {
        self.simulated_members.iter().map(Into::into).collect()
    }
}

/// A saved result as returned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResult {
    /// Record identifier
    pub id: SavedResultId,
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Algorithm that produced the result
    #[serde(rename = "algoritmo")]
    pub algorithm: AlgorithmKind,
    /// Best fitness of the run
    #[serde(rename = "melhor_fitness", default)]
    pub best_fitness: Option<f64>,
    /// Derived roadmap end date
    #[serde(default)]
    pub roadmap_end_date: Option<NaiveDate>,
    /// Owning squad
    #[serde(default)]
    pub squad_id: Option<SquadId>,
    /// Owning year
    #[serde(rename = "ano", default)]
    pub year: Option<i32>,
    /// Server-side timestamp of the save
    #[serde(rename = "data_execucao", default)]
    pub executed_at: Option<String>,
    /// Stored schedule (absent in list summaries)
    #[serde(rename = "tarefas", default)]
    pub tasks: Option<Vec<ScheduledTask>>,
    /// Stored fitness history
    #[serde(rename = "historico_fitness", default)]
    pub fitness_history: Option<Vec<f64>>,
    /// Stored penalty totals
    #[serde(rename = "penalidades", default)]
    pub penalties: Option<BTreeMap<String, f64>>,
    /// Stored penalty occurrences
    #[serde(rename = "ocorrencias_penalidades", default)]
    pub penalty_occurrences: Option<BTreeMap<String, Vec<Value>>>,
    /// Stored parameters and roster snapshot
    #[serde(rename = "parametros", default)]
    pub parameters: Option<SavedParameters>,
}

impl SavedResult {
    /// Rebuild the run output stored in this record
    ///
    /// Columns the server left null come back empty.
    pub fn run_result(&self) -> RunResult {
        RunResult {
            tasks: self.tasks.clone().unwrap_or_default(),
            best_fitness: self.best_fitness.unwrap_or_default(),
            fitness_history: self.fitness_history.clone().unwrap_or_default(),
            penalties: self.penalties.clone().unwrap_or_default(),
            penalty_occurrences: self.penalty_occurrences.clone().unwrap_or_default(),
        }
    }
}

/// Body sent when saving a result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSavedResult {
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Algorithm that produced the result
    #[serde(rename = "algoritmo")]
    pub algorithm: AlgorithmKind,
    /// Derived roadmap end date
    pub roadmap_end_date: Option<NaiveDate>,
    /// Owning squad
    pub squad_id: Option<SquadId>,
    /// Owning year
    #[serde(rename = "ano")]
    pub year: Option<i32>,
    /// Run output, flattened next to the record fields
    #[serde(flatten)]
    pub result: RunResult,
    /// Parameters and roster snapshot
    #[serde(rename = "parametros")]
    pub parameters: SavedParameters,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GaParams;
    use serde_json::json;

    #[test]
    fn test_filter_query() {
        assert!(ResultFilter::default().query().is_empty());
        let filter = ResultFilter {
            squad_id: Some(2),
            year: Some(2025),
        };
        assert_eq!(
            filter.query(),
            vec![("squad_id", "2".to_string()), ("ano", "2025".to_string())]
        );
    }

    #[test]
    fn test_saved_result_summary_without_payload() {
        let saved: SavedResult = serde_json::from_value(json!({
            "id": 4,
            "nome": "Plano Q1",
            "algoritmo": "ga",
            "melhor_fitness": 12.5,
            "roadmap_end_date": "2025-02-14",
            "squad_id": 1,
            "ano": 2025,
            "data_execucao": "2025-10-09T15:02:46.499880"
        }))
        .unwrap();
        assert_eq!(saved.id, 4);
        assert_eq!(saved.algorithm, AlgorithmKind::Ga);
        assert_eq!(saved.roadmap_end_date, NaiveDate::from_ymd_opt(2025, 2, 14));
        assert!(saved.tasks.is_none());
        assert!(saved.parameters.is_none());
        assert_eq!(saved.run_result().best_fitness, 12.5);
        assert!(saved.run_result().tasks.is_empty());
    }

    #[test]
    fn test_saved_parameters_round_trip_through_record() {
        let saved: SavedResult = serde_json::from_value(json!({
            "id": 9,
            "nome": "Cenario ACO",
            "algoritmo": "ACO",
            "melhor_fitness": 3.0,
            "tarefas": [{"fim_dias": 2, "data_fim": "03/01/2025"}],
            "historico_fitness": [1.0, 3.0],
            "parametros": {
                "algorithm": "aco",
                "alpha": 1.5,
                "ref_date": "2025-01-01",
                "saved_colaboradores": [{"id": 1, "nome": "Ana", "cargo": "Dev"}],
                "simulated_members": [{
                    "nome": "Sim",
                    "cargo_id": 2,
                    "cargo": {"id": 2, "nome": "QA"},
                    "habilidade_names": ["Testes"],
                    "habilidades": [{"id": 5, "nome": "Testes"}],
                    "inicio": null,
                    "termino": "2025-06-30"
                }]
            }
        }))
        .unwrap();

        assert_eq!(saved.algorithm, AlgorithmKind::Aco);
        let result = saved.run_result();
        assert_eq!(result.best_fitness, 3.0);
        assert_eq!(result.fitness_history, vec![1.0, 3.0]);
        assert_eq!(result.tasks[0].end_day, 2);
        let parameters = saved.parameters.unwrap();
        assert_eq!(parameters.params.kind(), AlgorithmKind::Aco);
        let roster = parameters.saved_collaborators.clone().unwrap();
        assert_eq!(roster[0].name, "Ana");
        let members = parameters.simulated_members();
        assert_eq!(members[0].role.name, "QA");
        assert_eq!(members[0].end, NaiveDate::from_ymd_opt(2025, 6, 30));
    }

    #[test]
    fn test_new_saved_result_wire_shape() {
        let record = NewSavedResult {
            name: "Plano".to_string(),
            algorithm: AlgorithmKind::Ga,
            roadmap_end_date: NaiveDate::from_ymd_opt(2025, 2, 14),
            squad_id: Some(1),
            year: Some(2025),
            result: RunResult {
                best_fitness: 15.7,
                ..Default::default()
            },
            parameters: SavedParameters {
                params: AlgorithmParams::Ga(GaParams::default()),
                project_ids: vec![1],
                collaborator_ids: vec![2],
                roadmap_end_date: NaiveDate::from_ymd_opt(2025, 2, 14),
                saved_collaborators: Some(vec![Collaborator::new(2, "Bruno")]),
                simulated_members: Vec::new(),
            },
        };

        let body = serde_json::to_value(&record).unwrap();
        assert_eq!(body["nome"], json!("Plano"));
        assert_eq!(body["algoritmo"], json!("ga"));
        assert_eq!(body["melhor_fitness"], json!(15.7));
        assert_eq!(body["roadmap_end_date"], json!("2025-02-14"));
        assert_eq!(body["ano"], json!(2025));
        assert_eq!(body["tarefas"], json!([]));
        assert_eq!(body["historico_fitness"], json!([]));
        assert_eq!(body["parametros"]["algorithm"], json!("ga"));
        assert_eq!(body["parametros"]["tam_pop"], json!(20));
        assert_eq!(
            body["parametros"]["saved_colaboradores"],
            json!([{"id": 2, "nome": "Bruno"}])
        );
    }
}
