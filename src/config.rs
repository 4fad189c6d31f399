//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::constants::{
    ACO_FINALIZE_PATH, ACO_STREAM_PATH, COMPARISON_PATH, GA_FINALIZE_PATH, GA_STREAM_PATH,
    SAVED_RESULTS_PATH,
};
use crate::model::AlgorithmKind;
use std::env;
use std::time::Duration;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP transport configuration
    pub transport: TransportConfig,
    /// Server endpoint paths
    pub endpoints: EndpointConfig,
    /// Capacity of the state-change broadcast channel
    pub event_capacity: usize,
}

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL of the roadmap API (scheme, host and port)
    pub base_url: String,
    /// Timeout for ordinary request/response calls (in seconds)
    ///
    /// Not applied to the progress stream, which stays open for as long as
    /// the server-side computation runs.
    pub request_timeout_secs: u64,
    /// Timeout for establishing a connection (in seconds)
    pub connect_timeout_secs: u64,
}

/// Streaming and finalize endpoints of one algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmEndpoints {
    /// Endpoint answering with the incremental progress stream
    pub stream: String,
    /// Endpoint answering with the complete result document
    pub finalize: String,
}

/// Endpoint paths, relative to [`TransportConfig::base_url`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Genetic algorithm endpoints
    pub ga: AlgorithmEndpoints,
    /// Ant-colony optimization endpoints
    pub aco: AlgorithmEndpoints,
    /// Algorithm comparison endpoint
    pub comparison: String,
    /// Saved-results collection endpoint
    pub saved_results: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            ga: AlgorithmEndpoints {
                stream: GA_STREAM_PATH.to_string(),
                finalize: GA_FINALIZE_PATH.to_string(),
            },
            aco: AlgorithmEndpoints {
                stream: ACO_STREAM_PATH.to_string(),
                finalize: ACO_FINALIZE_PATH.to_string(),
            },
            comparison: COMPARISON_PATH.to_string(),
            saved_results: SAVED_RESULTS_PATH.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Endpoint pair used to run the given algorithm
    pub fn for_algorithm(&self, algorithm: AlgorithmKind) -> &AlgorithmEndpoints {
        match algorithm {
            AlgorithmKind::Ga => &self.ga,
            AlgorithmKind::Aco => &self.aco,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: TransportConfig {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_secs: 600,
                connect_timeout_secs: 10,
            },
            endpoints: EndpointConfig::default(),
            event_capacity: 64,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            transport: TransportConfig {
                base_url: env::var("ROADMAP_API_URL")
                    .unwrap_or_else(|_| defaults.transport.base_url.clone()),
                request_timeout_secs: env_number("ROADMAP_REQUEST_TIMEOUT_SECS")
                    .unwrap_or(defaults.transport.request_timeout_secs),
                connect_timeout_secs: env_number("ROADMAP_CONNECT_TIMEOUT_SECS")
                    .unwrap_or(defaults.transport.connect_timeout_secs),
            },
            endpoints: defaults.endpoints,
            event_capacity: env_number("ROADMAP_EVENT_CAPACITY")
                .map(|capacity| capacity as usize)
                .unwrap_or(defaults.event_capacity),
        }
    }

    /// Validate the configuration
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.transport.base_url.trim().is_empty() {
            return Err("ROADMAP_API_URL cannot be empty".to_string());
        }
        if self.transport.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be > 0".to_string());
        }
        if self.transport.connect_timeout_secs == 0 {
            return Err("connect_timeout_secs must be > 0".to_string());
        }
        if self.event_capacity == 0 {
            return Err("event_capacity must be > 0".to_string());
        }
        Ok(())
    }
}

impl TransportConfig {
    /// Timeout applied to ordinary request/response calls
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Timeout applied while connecting
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn env_number(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
