//! Self-play games between two policies, one at a time or as a parallel batch.

use crate::error::{GameError, Result};
use crate::game::game_state::{GameState, NUM_PLAYERS};
use crate::game::get_legal_moves::MoveGenLimits;
use crate::game::simulate_game::play_out;
use crate::simulation::config::SimulationConfig;
use crate::strategy::policy::{Policy, PolicyKind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Outcome of one self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Position in the batch (0 for a lone game).
    pub index: usize,
    pub seed: u64,
    /// Higher final score, `None` on a tie.
    pub winner: Option<usize>,
    pub scores: [u32; NUM_PLAYERS],
    /// Turn number the game stopped on.
    pub turns: u32,
    pub bonus_lines: [u32; NUM_PLAYERS],
    pub max_turn_score: u32,
    pub max_turn_player: Option<usize>,
    /// False if the game hit the turn ceiling or had to be forced to end.
    pub completed: bool,
}

/// Plays a fresh game from `seed` with the default move-search limits.
pub fn run_game(
    policies: &mut [Policy; 2],
    seed: u64,
    max_turns: u32,
) -> std::result::Result<GameResult, GameError> {
    run_game_with_limits(policies, seed, max_turns, &MoveGenLimits::default())
}

pub fn run_game_with_limits(
    policies: &mut [Policy; 2],
    seed: u64,
    max_turns: u32,
    limits: &MoveGenLimits,
) -> std::result::Result<GameResult, GameError> {
    let mut state = GameState::new_game(Some(seed));
    let summary = play_out(&mut state, policies, max_turns, limits)?;

    Ok(GameResult {
        index: 0,
        seed,
        winner: summary.winner,
        scores: state.scores(),
        turns: state.turn_number(),
        bonus_lines: state.bonus_lines(),
        max_turn_score: summary.max_turn_score,
        max_turn_player: summary.max_turn_player,
        completed: summary.completed,
    })
}

/// Policy seeds for the two players of a game dealt from `seed`.
/// Distinct across games: `2 * seed` and `2 * seed + 1`.
pub fn policy_seeds(seed: u64) -> [u64; 2] {
    let even = seed.wrapping_mul(2);
    [even, even.wrapping_add(1)]
}

/// Plays `n_games` in parallel. Game `i` is dealt from `base_seed + i` and
/// its policies are seeded by [`policy_seeds`], so a batch replays exactly.
/// Results come back in game order.
pub fn run_batch(
    n_games: usize,
    policies: [PolicyKind; 2],
    base_seed: u64,
    config: &SimulationConfig,
) -> Result<Vec<GameResult>> {
    config.validate()?;
    for kind in &policies {
        kind.validate()?;
    }

    log::info!(
        "🎮 Running {} games: {} vs {} ({})",
        n_games,
        policies[0],
        policies[1],
        config.to_config_string()
    );
    let start = Instant::now();
    let pool = config.thread_pool()?;
    let finished = AtomicUsize::new(0);
    let report_every = (n_games / 10).max(1);

    let outcomes: Vec<std::result::Result<GameResult, GameError>> = pool.install(|| {
        (0..n_games)
            .into_par_iter()
            .map(|index| -> std::result::Result<GameResult, GameError> {
                let seed = base_seed.wrapping_add(index as u64);
                let [seed0, seed1] = policy_seeds(seed);
                let mut players = [policies[0].build(seed0), policies[1].build(seed1)];
                let mut result =
                    run_game_with_limits(&mut players, seed, config.max_turns, &config.move_limits)?;
                result.index = index;

                let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
                if done % report_every == 0 {
                    log::info!("Progress: {}/{} games", done, n_games);
                }
                Ok(result)
            })
            .collect()
    });

    let mut results = outcomes
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    results.sort_by_key(|r| r.index);

    let unfinished = results.iter().filter(|r| !r.completed).count();
    if unfinished > 0 {
        log::warn!("⚠️ {} game(s) stopped before a natural finish", unfinished);
    }
    log::info!("✅ {} games in {:.2?}", results.len(), start.elapsed());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            workers: 2,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_run_game_reports_final_state() {
        let mut policies = [Policy::Greedy, Policy::Greedy];
        let result = run_game(&mut policies, 42, 200).unwrap();

        assert_eq!(result.seed, 42);
        assert!(result.turns >= 1);
        assert!(result.scores.iter().sum::<u32>() > 0);
        assert!(result.max_turn_score > 0);
        assert!(result.max_turn_score <= *result.scores.iter().max().unwrap());
        match result.winner {
            Some(p) => assert!(result.scores[p] > result.scores[1 - p]),
            None => assert_eq!(result.scores[0], result.scores[1]),
        }
    }

    #[test]
    fn test_batch_is_ordered_and_reproducible() {
        let kinds = [PolicyKind::Greedy, PolicyKind::Random];
        let first = run_batch(6, kinds.clone(), 100, &small_config()).unwrap();
        let second = run_batch(6, kinds, 100, &small_config()).unwrap();

        assert_eq!(first.len(), 6);
        for (i, result) in first.iter().enumerate() {
            assert_eq!(result.index, i);
            assert_eq!(result.seed, 100 + i as u64);
        }
        assert_eq!(first, second, "Same seeds must replay the same batch");
    }

    #[test]
    fn test_batch_matches_single_games() {
        let kinds = [PolicyKind::Random, PolicyKind::Greedy];
        let batch = run_batch(3, kinds.clone(), 7, &small_config()).unwrap();

        let seed = 7 + 2;
        let [seed0, seed1] = policy_seeds(seed);
        let mut players = [kinds[0].build(seed0), kinds[1].build(seed1)];
        let mut single = run_game(&mut players, seed, 200).unwrap();
        single.index = 2;
        assert_eq!(batch[2], single);
    }

    #[test]
    fn test_policy_seeds_never_repeat_across_games() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..500u64 {
            for s in policy_seeds(seed) {
                assert!(seen.insert(s), "Policy seed {} reused by game {}", s, seed);
            }
        }
        assert_eq!(policy_seeds(0), [0, 1]);
        assert_eq!(policy_seeds(1), [2, 3]);
    }

    #[test]
    fn test_empty_batch() {
        let results = run_batch(0, [PolicyKind::Greedy, PolicyKind::Greedy], 0, &small_config()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_batch_rejects_bad_policy() {
        let kinds = [PolicyKind::WeightedRandom { temperature: -1.0 }, PolicyKind::Greedy];
        assert!(run_batch(1, kinds, 0, &small_config()).is_err());
    }
}
