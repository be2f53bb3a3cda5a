pub mod config;
pub mod runner;
pub mod stats;
pub mod win_probability;

pub use config::SimulationConfig;
pub use runner::{policy_seeds, run_batch, run_game, run_game_with_limits, GameResult};
pub use stats::{compute_stats, score_distribution, AggregateStats};
pub use win_probability::{estimate_win_probability, unseen_tiles, WinProbability};
