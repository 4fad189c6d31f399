//! Smoke utility that drives one roadmap run against a live server
//! This is a utility binary, not part of the library API
//!
//! Usage: run_roadmap <request.json> [directory.json]

use anyhow::{bail, Context, Result};
use roadmap_orchestrator::model::{CollaboratorDirectory, ExecutionRequest};
use roadmap_orchestrator::state::OrchestratorEvent;
use roadmap_orchestrator::{Config, ExecutionOrchestrator};
use std::env;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadmap_orchestrator=info,run_roadmap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(request_path) = args.get(1) else {
        bail!("Usage: run_roadmap <request.json> [directory.json]");
    };

    let request: ExecutionRequest = read_json(Path::new(request_path))?;
    let directory: CollaboratorDirectory = match args.get(2) {
        Some(path) => read_json(Path::new(path))?,
        None => {
            tracing::warn!("No collaborator directory given, roster will be empty");
            CollaboratorDirectory::default()
        }
    };

    let config = Config::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    println!(
        "Running {} against {}...\n",
        request.algorithm(),
        config.transport.base_url
    );

    let mut orchestrator =
        ExecutionOrchestrator::from_config(&config).context("Failed to build HTTP client")?;

    let mut events = orchestrator.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                OrchestratorEvent::Progress { progress } => println!(
                    "   {}/{} ({:.0}%) best fitness {:.2}",
                    progress.current, progress.total, progress.percent, progress.fitness
                ),
                OrchestratorEvent::StateChanged { from, to } => println!("   {} -> {}", from, to),
                OrchestratorEvent::RunFailed { message } => println!("   ✗ {}", message),
                OrchestratorEvent::RunCompleted { best_fitness } => {
                    println!("   ✓ Completed with best fitness {:.2}", best_fitness)
                }
            }
        }
    });

    let outcome = orchestrator.run(&request, &directory).await;
    drop(orchestrator);
    let _ = printer.await;

    let result = outcome.context("Run failed")?;
    println!("\nTasks: {}", result.tasks.len());
    for task in &result.tasks {
        println!(
            "   {} / {}: {} -> {} ({})",
            task.project, task.task_name, task.start_date, task.end_date, task.collaborator
        );
    }
    if let Some(end) = result.roadmap_end_date() {
        println!("\nRoadmap ends on {}", end);
    }

    Ok(())
}
