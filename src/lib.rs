//! # Qwirkle Game Core
//!
//! Rules, scoring, move search, turn management and outcome estimation for
//! two-player Qwirkle.
//!
//! ## Features
//!
//! - **Game Engine**: tiles, bag, hands, an unbounded board and the turn state machine
//! - **Rules & Scoring**: placement validation and deterministic scoring
//! - **Move Generation**: bounded search over single- and multi-tile moves
//! - **Policies**: greedy, random, weighted-random and epsilon-greedy move selection
//! - **Simulation**: parallel self-play batches, statistics and Monte Carlo win probability
//!
//! ## Usage
//!
//! ```rust
//! use qwirkle::{best_move, GameState};
//!
//! let mut state = GameState::new_game(Some(42));
//! let mv = best_move(&state).expect("an opening move always exists");
//! state.apply_move(&mv.placements).expect("generated moves are legal");
//! assert_eq!(state.current_player(), 1);
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game data model and state machine
pub mod game;

/// Placement validation
pub mod rules;

/// Scoring
pub mod scoring;

/// Move-selection policies
pub mod strategy;

/// Self-play batches, statistics and win probability
pub mod simulation;

/// Error types
pub mod error;

/// Logger setup
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use error::{GameError, HandError, QwirkleError, Rejection, Result};
pub use game::board::{Axis, Board, Placement, Position};
pub use game::game_state::GameState;
pub use game::get_legal_moves::{get_legal_moves, get_legal_moves_with_limits, Move, MoveGenLimits};
pub use game::tile::{Color, Shape, Tile};
pub use simulation::{
    compute_stats, estimate_win_probability, run_batch, run_game, AggregateStats, GameResult,
    SimulationConfig, WinProbability,
};
pub use strategy::{best_move, hint, random_move, Policy, PolicyKind};

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
