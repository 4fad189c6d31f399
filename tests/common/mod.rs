//! Shared fixtures for orchestrator tests
//!
//! `ScriptedTransport` answers with canned stream bodies and JSON documents
//! and records every call; `InMemoryResultStore` keeps saved results in a Vec.

#![allow(dead_code)]

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use roadmap_orchestrator::config::EndpointConfig;
use roadmap_orchestrator::constants::COMPARISON_PATH;
use roadmap_orchestrator::error::StoreError;
use roadmap_orchestrator::model::{
    AcoParams, AlgorithmParams, Collaborator, CollaboratorDirectory, ExecutionRequest, GaParams,
    NewSavedResult, ResultFilter, SavedResult, SavedResultId,
};
use roadmap_orchestrator::orchestrator::ResultStore;
use roadmap_orchestrator::state::OrchestratorEvent;
use roadmap_orchestrator::transport::{ByteStream, Transport, TransportError};
use roadmap_orchestrator::ExecutionOrchestrator;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// One recorded transport call
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

/// How the stream endpoint answers
#[derive(Clone)]
enum StreamScript {
    Body {
        chunks: Vec<Result<Vec<u8>, TransportError>>,
        hang: bool,
    },
    Refused(TransportError),
}

/// Transport with canned answers
pub struct ScriptedTransport {
    stream: Mutex<StreamScript>,
    finalize: Mutex<Result<Value, TransportError>>,
    comparison: Mutex<Result<Value, TransportError>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            stream: Mutex::new(StreamScript::Body {
                chunks: Vec::new(),
                hang: false,
            }),
            finalize: Mutex::new(Ok(json!({}))),
            comparison: Mutex::new(Ok(json!({}))),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Stream body delivered as one chunk
    pub fn with_stream(self, body: &str) -> Self {
        self.with_chunks(vec![Ok(body.as_bytes().to_vec())])
    }

    /// Stream body delivered chunk by chunk
    pub fn with_chunks(self, chunks: Vec<Result<Vec<u8>, TransportError>>) -> Self {
        *self.stream.lock().unwrap() = StreamScript::Body {
            chunks,
            hang: false,
        };
        self
    }

    /// Stream body that never ends after its chunks
    pub fn with_hanging_stream(self, body: &str) -> Self {
        *self.stream.lock().unwrap() = StreamScript::Body {
            chunks: vec![Ok(body.as_bytes().to_vec())],
            hang: true,
        };
        self
    }

    /// Stream request fails before any body
    pub fn refusing_stream(self, error: TransportError) -> Self {
        *self.stream.lock().unwrap() = StreamScript::Refused(error);
        self
    }

    pub fn with_finalize(self, response: Result<Value, TransportError>) -> Self {
        *self.finalize.lock().unwrap() = response;
        self
    }

    pub fn with_comparison(self, response: Result<Value, TransportError>) -> Self {
        *self.comparison.lock().unwrap() = response;
        self
    }

    pub fn set_stream(&self, body: &str) {
        *self.stream.lock().unwrap() = StreamScript::Body {
            chunks: vec![Ok(body.as_bytes().to_vec())],
            hang: false,
        };
    }

    pub fn set_finalize(&self, response: Result<Value, TransportError>) {
        *self.finalize.lock().unwrap() = response;
    }

    pub fn set_comparison(&self, response: Result<Value, TransportError>) {
        *self.comparison.lock().unwrap() = response;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| c.path == path).count()
    }

    pub fn last_body(&self, path: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|c| c.path == path)
            .map(|c| c.body)
    }

    fn record(&self, method: &'static str, path: &str, body: Value) {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_stream(&self, path: &str, body: &Value) -> Result<ByteStream, TransportError> {
        self.record("POST", path, body.clone());
        let script = self.stream.lock().unwrap().clone();
        match script {
            StreamScript::Refused(error) => Err(error),
            StreamScript::Body { chunks, hang } => {
                let body = stream::iter(chunks);
                if hang {
                    Ok(Box::pin(body.chain(stream::pending())))
                } else {
                    Ok(Box::pin(body))
                }
            }
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.record("POST", path, body.clone());
        if path == COMPARISON_PATH {
            self.comparison.lock().unwrap().clone()
        } else {
            self.finalize.lock().unwrap().clone()
        }
    }

    async fn get_json(
        &self,
        path: &str,
        _query: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        self.record("GET", path, Value::Null);
        Err(TransportError::Connection("not scripted".to_string()))
    }

    async fn delete(&self, path: &str) -> Result<(), TransportError> {
        self.record("DELETE", path, Value::Null);
        Err(TransportError::Connection("not scripted".to_string()))
    }
}

/// Saved results kept in memory
#[derive(Default)]
pub struct InMemoryResultStore {
    records: Mutex<Vec<SavedResult>>,
    created: Mutex<Vec<Value>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    /// Seed a record from its wire form
    pub fn insert(&self, record: Value) -> SavedResultId {
        let record: SavedResult = serde_json::from_value(record).unwrap();
        let id = record.id;
        self.records.lock().unwrap().push(record);
        id
    }

    /// Make every call fail
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of store calls of any kind
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Bodies passed to `create`, as sent on the wire
    pub fn created(&self) -> Vec<Value> {
        self.created.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Transport(TransportError::Connection(
                "store offline".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn list(&self, filter: &ResultFilter) -> Result<Vec<SavedResult>, StoreError> {
        self.enter()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.squad_id.map_or(true, |s| r.squad_id == Some(s)))
            .filter(|r| filter.year.map_or(true, |y| r.year == Some(y)))
            .cloned()
            .collect())
    }

    async fn create(&self, record: &NewSavedResult) -> Result<SavedResultId, StoreError> {
        self.enter()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as SavedResultId;

        let mut wire = serde_json::to_value(record).unwrap();
        self.created.lock().unwrap().push(wire.clone());
        wire["id"] = json!(id);
        wire["data_execucao"] = json!("2025-03-01T09:30:00");
        let saved: SavedResult = serde_json::from_value(wire).unwrap();
        self.records.lock().unwrap().push(saved);
        Ok(id)
    }

    async fn get(&self, id: SavedResultId) -> Result<SavedResult, StoreError> {
        self.enter()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| {
                StoreError::Transport(TransportError::Status {
                    status: 404,
                    body: "{\"detail\": \"Resultado não encontrado\"}".to_string(),
                })
            })
    }

    async fn delete(&self, id: SavedResultId) -> Result<(), StoreError> {
        self.enter()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::Transport(TransportError::Status {
                status: 404,
                body: "{\"detail\": \"Resultado não encontrado\"}".to_string(),
            }));
        }
        Ok(())
    }
}

pub fn orchestrator(
    transport: &Arc<ScriptedTransport>,
    store: &Arc<InMemoryResultStore>,
) -> ExecutionOrchestrator {
    ExecutionOrchestrator::new(
        transport.clone(),
        store.clone(),
        EndpointConfig::default(),
        256,
    )
}

pub fn progress_line(generation: u64, total: u64, best_fitness: f64) -> String {
    format!(
        "data: {}\n\n",
        json!({
            "type": "progress",
            "generation": generation,
            "total_generations": total,
            "best_fitness": best_fitness
        })
    )
}

pub fn complete_line() -> String {
    "data: {\"type\": \"complete\"}\n\n".to_string()
}

pub fn error_line(message: &str) -> String {
    format!("data: {}\n\n", json!({ "error": message }))
}

pub fn directory() -> CollaboratorDirectory {
    let squad = vec![
        Collaborator::new(1, "Ana"),
        Collaborator::new(2, "Bruno"),
        Collaborator::new(3, "Carla"),
    ];
    let mut everyone = squad.clone();
    everyone.push(Collaborator::new(10, "Diego"));
    everyone.push(Collaborator::new(11, "Elisa"));
    CollaboratorDirectory { squad, everyone }
}

pub fn ga_request() -> ExecutionRequest {
    let mut request = ExecutionRequest::new(AlgorithmParams::Ga(GaParams {
        population_size: 30,
        generations: 50,
        ..Default::default()
    }));
    request.project_ids = vec![1, 2];
    request.collaborator_ids = vec![1, 2];
    request.cross_team_ids = vec![10];
    request
}

pub fn aco_request() -> ExecutionRequest {
    let mut request = ExecutionRequest::new(AlgorithmParams::Aco(AcoParams::default()));
    request.project_ids = vec![1];
    request.collaborator_ids = vec![3];
    request
}

pub fn finalize_body(best_fitness: f64) -> Value {
    json!({
        "melhor_fitness": best_fitness,
        "tarefas": [
            {
                "projeto": "Portal",
                "nome_tarefa": "API",
                "inicio_dias": 0,
                "data_inicio": "01/01/2025",
                "fim_dias": 5,
                "data_fim": "31/01/2025",
                "colaborador": "Ana",
                "duracao_dias": 5
            },
            {
                "projeto": "Portal",
                "nome_tarefa": "Frontend",
                "inicio_dias": 5,
                "data_inicio": "03/02/2025",
                "fim_dias": 12,
                "data_fim": "14/02/2025",
                "colaborador": "Diego",
                "duracao_dias": 7
            }
        ],
        "historico_fitness": [10.2, best_fitness],
        "penalidades": {"atraso": 1.5},
        "ocorrencias_penalidades": {"atraso": [{"tarefa": "Frontend", "dias": 2}]}
    })
}

/// Every event published so far
pub fn drain(events: &mut broadcast::Receiver<OrchestratorEvent>) -> Vec<OrchestratorEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}
