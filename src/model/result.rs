//! Run result types
//!
//! Mirrors the result document returned by the finalize endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Date format used by the server in task rows (`31/01/2025`)
const TASK_DATE_FORMAT: &str = "%d/%m/%Y";

/// One scheduled task of the roadmap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduledTask {
    /// Project the task belongs to
    #[serde(rename = "projeto")]
    pub project: String,
    /// Task (stage) name
    #[serde(rename = "nome_tarefa")]
    pub task_name: String,
    /// Start offset in days from the reference date
    #[serde(rename = "inicio_dias")]
    pub start_day: i64,
    /// Start date, `DD/MM/YYYY`
    #[serde(rename = "data_inicio")]
    pub start_date: String,
    /// End offset in days from the reference date
    #[serde(rename = "fim_dias")]
    pub end_day: i64,
    /// End date, `DD/MM/YYYY`
    #[serde(rename = "data_fim")]
    pub end_date: String,
    /// Assigned collaborator name
    #[serde(rename = "colaborador")]
    pub collaborator: String,
    /// Working days of effort
    #[serde(rename = "duracao_dias")]
    pub duration_days: i64,
}

impl ScheduledTask {
    /// End date parsed from its `DD/MM/YYYY` text, if well formed
    pub fn parsed_end_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.end_date.trim(), TASK_DATE_FORMAT).ok()
    }
}

/// Output of a completed run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunResult {
    /// Ordered schedule
    #[serde(rename = "tarefas")]
    pub tasks: Vec<ScheduledTask>,
    /// Best fitness reached
    #[serde(rename = "melhor_fitness")]
    pub best_fitness: f64,
    /// Best fitness per generation/iteration, in order
    #[serde(rename = "historico_fitness")]
    pub fitness_history: Vec<f64>,
    /// Penalty totals by penalty name
    #[serde(rename = "penalidades")]
    pub penalties: BTreeMap<String, f64>,
    /// Occurrences behind each penalty
    #[serde(rename = "ocorrencias_penalidades")]
    pub penalty_occurrences: BTreeMap<String, Vec<Value>>,
}

impl RunResult {
    /// Task finishing last, by end offset
    ///
    /// The first task wins when several share the maximal offset.
    pub fn final_task(&self) -> Option<&ScheduledTask> {
        self.tasks.iter().fold(None, |latest, task| match latest {
            Some(current) if task.end_day <= current.end_day => Some(current),
            _ => Some(task),
        })
    }

    /// Calendar end date of the roadmap
    ///
    /// Absent when there are no tasks or the final task's date is unreadable.
    pub fn roadmap_end_date(&self) -> Option<NaiveDate> {
        let task = self.final_task()?;
        let date = task.parsed_end_date();
        if date.is_none() {
            tracing::warn!(
                task = %task.task_name,
                end_date = %task.end_date,
                "Final task has an unreadable end date"
            );
        }
        date
    }
}

/// Request body for the algorithm comparison endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRequest {
    /// Shared reference date
    pub ref_date: NaiveDate,
    /// Genetic algorithm hyperparameters
    pub ga_params: super::GaParams,
    /// Ant-colony optimization hyperparameters
    pub aco_params: super::AcoParams,
}

/// Side-by-side comparison document, passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonResult(pub Value);
