//! Monte Carlo win-probability estimate from one player's point of view.
//!
//! The viewer sees the board and their own hand. The opponent's hand and the
//! bag are hidden, so every trial redeals them from the unseen tiles and plays
//! the game out with the chosen policy for both sides.

use crate::error::{GameError, QwirkleError, Result};
use crate::game::bag::Bag;
use crate::game::create_bag::full_tile_set;
use crate::game::game_state::{GameState, NUM_PLAYERS};
use crate::game::hand::Hand;
use crate::game::simulate_game::play_out;
use crate::game::tile::Tile;
use crate::simulation::config::SimulationConfig;
use crate::simulation::runner::policy_seeds;
use crate::strategy::policy::PolicyKind;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinProbability {
    pub p0: f64,
    pub p1: f64,
    pub tie: f64,
    pub n_simulations: usize,
    /// Rough sample-size indicator, `min(0.99, 1 - 0.5 / sqrt(n))`.
    /// Not a statistical confidence level.
    pub confidence: f64,
}

impl WinProbability {
    fn from_counts(wins: [usize; NUM_PLAYERS], ties: usize) -> Self {
        let n = wins[0] + wins[1] + ties;
        let total = n as f64;
        WinProbability {
            p0: wins[0] as f64 / total,
            p1: wins[1] as f64 / total,
            tie: ties as f64 / total,
            n_simulations: n,
            confidence: confidence_for(n),
        }
    }

    /// Certain outcome of a finished game.
    fn settled(winner: Option<usize>) -> Self {
        match winner {
            Some(0) => Self::from_counts([1, 0], 0),
            Some(_) => Self::from_counts([0, 1], 0),
            None => Self::from_counts([0, 0], 1),
        }
    }

    pub fn for_player(&self, player: usize) -> f64 {
        if player == 0 {
            self.p0
        } else {
            self.p1
        }
    }

    /// Report with an arrow on the player to move.
    pub fn format_for(&self, current_player: usize) -> String {
        let marker = |p: usize| if p == current_player { "→ " } else { "  " };
        format!(
            "Win Probability ({} sims):\n{}Player 1: {:.1}%\n{}Player 2: {:.1}%",
            self.n_simulations,
            marker(0),
            self.p0 * 100.0,
            marker(1),
            self.p1 * 100.0
        )
    }
}

impl fmt::Display for WinProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P1 {:.1}% / P2 {:.1}% / tie {:.1}% ({} sims)",
            self.p0 * 100.0,
            self.p1 * 100.0,
            self.tie * 100.0,
            self.n_simulations
        )
    }
}

fn confidence_for(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (1.0 - 0.5 / (n as f64).sqrt()).min(0.99)
}

/// Tiles `viewer` cannot see: the full set minus the board and their own hand.
pub fn unseen_tiles(state: &GameState, viewer: usize) -> Vec<Tile> {
    let mut unseen = full_tile_set();
    let visible = state
        .board()
        .iter()
        .map(|(_, tile)| tile)
        .chain(state.hand(viewer).tiles().iter().copied());

    for tile in visible {
        match unseen.iter().position(|t| *t == tile) {
            Some(i) => {
                unseen.remove(i);
            }
            None => log::warn!("⚠️ More copies of {} in play than exist", tile),
        }
    }
    unseen
}

/// Estimates each player's chance of winning from `viewer`'s perspective.
///
/// A finished game gives its actual result with `n_simulations = 1`.
pub fn estimate_win_probability(
    state: &GameState,
    viewer: usize,
    n_simulations: usize,
    policy: &PolicyKind,
    seed: u64,
    config: &SimulationConfig,
) -> Result<WinProbability> {
    if state.is_over() {
        return Ok(WinProbability::settled(state.winner()));
    }
    if viewer >= NUM_PLAYERS {
        return Err(QwirkleError::Config(format!("no player {}", viewer)));
    }
    if n_simulations == 0 {
        return Err(QwirkleError::Config(
            "n_simulations must be at least 1".to_string(),
        ));
    }
    config.validate()?;
    policy.validate()?;

    let unseen = unseen_tiles(state, viewer);
    let mut master = StdRng::seed_from_u64(seed);
    let trial_seeds: Vec<u64> = (0..n_simulations).map(|_| master.random()).collect();

    let pool = config.thread_pool()?;
    let outcomes: Vec<std::result::Result<Option<usize>, GameError>> = pool.install(|| {
        trial_seeds
            .par_iter()
            .map(|&trial_seed| run_trial(state, viewer, &unseen, policy, trial_seed, config))
            .collect()
    });

    let mut wins = [0usize; NUM_PLAYERS];
    let mut ties = 0;
    for outcome in outcomes {
        match outcome? {
            Some(player) => wins[player] += 1,
            None => ties += 1,
        }
    }

    let estimate = WinProbability::from_counts(wins, ties);
    log::info!("🎯 Player {} view: {}", viewer + 1, estimate);
    Ok(estimate)
}

/// One redeal-and-playout. Returns the winner on final scores.
fn run_trial(
    state: &GameState,
    viewer: usize,
    unseen: &[Tile],
    policy: &PolicyKind,
    trial_seed: u64,
    config: &SimulationConfig,
) -> std::result::Result<Option<usize>, GameError> {
    let mut rng = StdRng::seed_from_u64(trial_seed);
    let mut sim = state.clone();

    let mut pool = unseen.to_vec();
    pool.shuffle(&mut rng);
    let opponent = 1 - viewer;
    let hand_size = sim.hands[opponent].len().min(pool.len());
    let rest = pool.split_off(hand_size);
    sim.hands[opponent] = Hand::new(pool)?;
    sim.bag = Bag::from_tiles(rest, rng.random());

    let [seed0, seed1] = policy_seeds(rng.random());
    let mut policies = [policy.build(seed0), policy.build(seed1)];
    let summary = play_out(
        &mut sim,
        &mut policies,
        config.estimator_max_turns,
        &config.move_limits,
    )?;
    Ok(summary.winner)
}
