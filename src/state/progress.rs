// Progress of the running computation, as last reported by the server

use crate::constants::INITIAL_PROGRESS;
use serde::{Deserialize, Serialize};

/// Iteration counters and best fitness of the current run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressData {
    /// Current generation/iteration
    pub current: u64,
    /// Total generations/iterations
    pub total: u64,
    /// `current / total * 100`, or 0 when `total` is 0
    pub percent: f64,
    /// Best fitness found so far
    pub fitness: f64,
}

impl ProgressData {
    /// Progress shown before the first frame arrives
    pub fn initial() -> Self {
        let (current, total) = INITIAL_PROGRESS;
        Self {
            current,
            total,
            percent: 0.0,
            fitness: 0.0,
        }
    }

    /// Progress reported by one frame
    ///
    /// Values are taken as the server sent them; `current > total` is not
    /// clamped.
    pub fn from_frame(current: u64, total: u64, fitness: f64) -> Self {
        let percent = if total > 0 {
            current as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            current,
            total,
            percent,
            fitness,
        }
    }
}

impl Default for ProgressData {
    fn default() -> Self {
        Self::initial()
    }
}
