//! Simulation settings shared by the batch runner and the win-probability
//! estimator. Loadable from a JSON file; every field has a default.

use crate::error::{QwirkleError, Result};
use crate::game::get_legal_moves::MoveGenLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // ========== Worker Pool ==========
    /// Threads used for parallel playouts.
    /// 0 = one per logical CPU (rayon default)
    /// Default: 0
    pub workers: usize,

    // ========== Turn Ceilings ==========
    /// Most actions in one batch game before it is cut off.
    /// Default: 200
    pub max_turns: u32,

    /// Most actions in one estimator playout.
    /// Default: 100
    pub estimator_max_turns: u32,

    // ========== Move Generation ==========
    /// Search bounds for multi-tile moves during playouts.
    pub move_limits: MoveGenLimits,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            max_turns: 200,
            estimator_max_turns: 100,
            move_limits: MoveGenLimits::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: SimulationConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded simulation config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 || self.estimator_max_turns == 0 {
            return Err(QwirkleError::Config(
                "turn ceilings must be at least 1".to_string(),
            ));
        }

        let limits = &self.move_limits;
        if limits.max_tiles < 2 {
            return Err(QwirkleError::Config(format!(
                "move_limits.max_tiles must be at least 2, got {}",
                limits.max_tiles
            )));
        }
        if limits.max_combinations_per_start == 0 || limits.max_multi_moves == 0 {
            return Err(QwirkleError::Config(
                "move_limits caps must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the worker pool for parallel playouts.
    pub fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;
        Ok(pool)
    }

    /// One-line summary for logs and reports.
    pub fn to_config_string(&self) -> String {
        format!(
            "workers[{}]_turns[{},{}]_movegen[{},{},{},{}]",
            self.workers,
            self.max_turns,
            self.estimator_max_turns,
            self.move_limits.max_tiles,
            self.move_limits.max_extend,
            self.move_limits.max_combinations_per_start,
            self.move_limits.max_multi_moves
        )
    }
}
