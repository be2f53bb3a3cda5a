//! Move-selection policies.
//!
//! [`PolicyKind`] is the plain, serializable description of a policy (what a
//! config file or the command line names). [`PolicyKind::build`] turns it into
//! a runnable [`Policy`] that owns its random generator, so each playout can
//! hold its own independently seeded instance.

use crate::error::{QwirkleError, Result};
use crate::game::game_state::GameState;
use crate::game::get_legal_moves::{get_legal_moves, Move};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyKind {
    /// Highest immediate score, ties to the first generated.
    Greedy,
    /// Uniform over legal moves.
    Random,
    /// Weighted by `(score + 1)^(1 / temperature)`.
    /// Higher temperature is closer to uniform.
    WeightedRandom { temperature: f64 },
    /// Uniform move with probability `epsilon`, otherwise `base`.
    EpsilonGreedy { base: Box<PolicyKind>, epsilon: f64 },
}

impl PolicyKind {
    pub fn build(&self, seed: u64) -> Policy {
        match self {
            PolicyKind::Greedy => Policy::Greedy,
            PolicyKind::Random => Policy::Random {
                rng: StdRng::seed_from_u64(seed),
            },
            PolicyKind::WeightedRandom { temperature } => Policy::WeightedRandom {
                rng: StdRng::seed_from_u64(seed),
                temperature: *temperature,
            },
            PolicyKind::EpsilonGreedy { base, epsilon } => {
                // Base samples from its own stream, independent of the explore roll.
                let mut rng = StdRng::seed_from_u64(seed);
                let base_seed: u64 = rng.random();
                Policy::EpsilonGreedy {
                    base: Box::new(base.build(base_seed)),
                    epsilon: *epsilon,
                    rng,
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            PolicyKind::Greedy | PolicyKind::Random => Ok(()),
            PolicyKind::WeightedRandom { temperature } => {
                if !(temperature.is_finite() && *temperature > 0.0) {
                    return Err(QwirkleError::Config(format!(
                        "temperature must be a positive number, got {}",
                        temperature
                    )));
                }
                Ok(())
            }
            PolicyKind::EpsilonGreedy { base, epsilon } => {
                if !(0.0..=1.0).contains(epsilon) {
                    return Err(QwirkleError::Config(format!(
                        "epsilon must be in [0, 1], got {}",
                        epsilon
                    )));
                }
                base.validate()
            }
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Greedy => write!(f, "greedy"),
            PolicyKind::Random => write!(f, "random"),
            PolicyKind::WeightedRandom { temperature } => write!(f, "weighted:{}", temperature),
            PolicyKind::EpsilonGreedy { base, epsilon } => write!(f, "epsilon:{}:{}", epsilon, base),
        }
    }
}

/// Parses `greedy`, `random`, `weighted[:T]` and `epsilon:E[:base]`
/// (base defaults to greedy). Accepts what `Display` writes.
impl FromStr for PolicyKind {
    type Err = QwirkleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bad = |what: &str| QwirkleError::Config(format!("invalid policy '{}': {}", s, what));
        let parse_f64 = |text: &str| text.parse::<f64>().map_err(|_| bad("expected a number"));

        let (name, rest) = match s.split_once(':') {
            Some((name, rest)) => (name, Some(rest)),
            None => (s, None),
        };

        let kind = match (name.trim().to_ascii_lowercase().as_str(), rest) {
            ("greedy", None) => PolicyKind::Greedy,
            ("random", None) => PolicyKind::Random,
            ("weighted", None) => PolicyKind::WeightedRandom { temperature: 1.0 },
            ("weighted", Some(t)) => PolicyKind::WeightedRandom {
                temperature: parse_f64(t)?,
            },
            ("epsilon", Some(rest)) => {
                let (epsilon, base) = match rest.split_once(':') {
                    Some((e, base)) => (parse_f64(e)?, base.parse::<PolicyKind>()?),
                    None => (parse_f64(rest)?, PolicyKind::Greedy),
                };
                PolicyKind::EpsilonGreedy {
                    base: Box::new(base),
                    epsilon,
                }
            }
            ("epsilon", None) => return Err(bad("epsilon needs a rate, e.g. epsilon:0.1")),
            _ => return Err(bad("unknown policy")),
        };
        kind.validate()?;
        Ok(kind)
    }
}

/// A runnable policy with its own RNG state.
#[derive(Debug, Clone)]
pub enum Policy {
    Greedy,
    Random {
        rng: StdRng,
    },
    WeightedRandom {
        rng: StdRng,
        temperature: f64,
    },
    EpsilonGreedy {
        base: Box<Policy>,
        epsilon: f64,
        rng: StdRng,
    },
}

impl Policy {
    /// Picks a move for the current player. Uses `moves` when given,
    /// otherwise generates them. `None` only when there is nothing to pick.
    pub fn select(&mut self, state: &GameState, moves: Option<&[Move]>) -> Option<Move> {
        match moves {
            Some(moves) => self.pick(moves),
            None => {
                let generated = legal_moves_for(state);
                self.pick(&generated)
            }
        }
    }

    pub fn choose_move(&mut self, state: &GameState) -> Option<Move> {
        self.select(state, None)
    }

    fn pick(&mut self, moves: &[Move]) -> Option<Move> {
        if moves.is_empty() {
            return None;
        }

        match self {
            Policy::Greedy => highest_scoring(moves).cloned(),
            Policy::Random { rng } => moves.choose(rng).cloned(),
            Policy::WeightedRandom { rng, temperature } => {
                if moves.len() == 1 {
                    return moves.first().cloned();
                }
                let exponent = 1.0 / *temperature;
                let weights: Vec<f64> = moves
                    .iter()
                    .map(|m| (m.score as f64 + 1.0).powf(exponent))
                    .collect();
                match WeightedIndex::new(&weights) {
                    Ok(dist) => moves.get(dist.sample(rng)).cloned(),
                    Err(e) => {
                        log::warn!("⚠️ Degenerate move weights ({}), falling back to uniform", e);
                        moves.choose(rng).cloned()
                    }
                }
            }
            Policy::EpsilonGreedy { base, epsilon, rng } => {
                if rng.random::<f64>() < *epsilon {
                    moves.choose(rng).cloned()
                } else {
                    base.pick(moves)
                }
            }
        }
    }
}

fn legal_moves_for(state: &GameState) -> Vec<Move> {
    get_legal_moves(state.board(), state.current_hand(), state.is_first_move())
}

fn highest_scoring(moves: &[Move]) -> Option<&Move> {
    moves.iter().reduce(|best, m| {
        if (m.score, m.bonus_lines) > (best.score, best.bonus_lines) {
            m
        } else {
            best
        }
    })
}

/// Highest-scoring move for the current player.
pub fn best_move(state: &GameState) -> Option<Move> {
    Policy::Greedy.choose_move(state)
}

/// Uniformly random legal move for the current player.
pub fn random_move(state: &GameState, seed: Option<u64>) -> Option<Move> {
    let seed = seed.unwrap_or_else(rand::random);
    PolicyKind::Random.build(seed).choose_move(state)
}

/// Suggestion shown to a human player.
pub fn hint(state: &GameState) -> Option<Move> {
    best_move(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::{Color, Shape, Tile};
    use assert_matches::assert_matches;

    fn moves_for(state: &GameState) -> Vec<Move> {
        legal_moves_for(state)
    }

    #[test]
    fn test_greedy_picks_top_score() {
        let state = GameState::new_game(Some(11));
        let moves = moves_for(&state);
        let top = moves.iter().map(|m| m.score).max().unwrap();
        let chosen = Policy::Greedy.select(&state, Some(&moves)).unwrap();
        assert_eq!(chosen.score, top);
        assert_eq!(best_move(&state).unwrap().score, top);
        assert_eq!(hint(&state), best_move(&state));
    }

    #[test]
    fn test_empty_moves_give_none() {
        let state = GameState::new_game(Some(1));
        for kind in [
            PolicyKind::Greedy,
            PolicyKind::Random,
            PolicyKind::WeightedRandom { temperature: 1.0 },
            PolicyKind::EpsilonGreedy {
                base: Box::new(PolicyKind::Greedy),
                epsilon: 0.5,
            },
        ] {
            let mut policy = kind.build(3);
            assert!(policy.select(&state, Some(&[])).is_none(), "{} must return None", kind);
        }
    }

    #[test]
    fn test_seeded_random_is_deterministic() {
        let state = GameState::new_game(Some(5));
        let moves = moves_for(&state);
        let mut a = PolicyKind::Random.build(99);
        let mut b = PolicyKind::Random.build(99);
        for _ in 0..10 {
            assert_eq!(a.select(&state, Some(&moves)), b.select(&state, Some(&moves)));
        }
    }

    #[test]
    fn test_weighted_choice_is_a_legal_move() {
        let state = GameState::new_game(Some(8));
        let moves = moves_for(&state);
        let mut policy = PolicyKind::WeightedRandom { temperature: 0.5 }.build(4);
        for _ in 0..20 {
            let chosen = policy.select(&state, Some(&moves)).unwrap();
            assert!(moves.contains(&chosen));
        }
    }

    /// One-tile moves with the given scores, in the given order.
    fn scored_moves(scores: &[u32]) -> Vec<Move> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| Move {
                placements: vec![((0, i as i32), Tile::new(Shape::Circle, Color::Red))],
                score,
                bonus_lines: 0,
            })
            .collect()
    }

    /// Fraction of `draws` picks that land on `moves[0]`.
    fn first_share(policy: &mut Policy, moves: &[Move], draws: usize) -> f64 {
        let state = GameState::new_game(Some(0));
        let hits = (0..draws)
            .filter(|_| policy.select(&state, Some(moves)).as_ref() == Some(&moves[0]))
            .count();
        hits as f64 / draws as f64
    }

    #[test]
    fn test_weighted_follows_score_plus_one() {
        // (3 + 1)^1 : (0 + 1)^1 = 4 : 1
        let moves = scored_moves(&[3, 0]);
        let mut policy = PolicyKind::WeightedRandom { temperature: 1.0 }.build(17);
        let share = first_share(&mut policy, &moves, 4000);
        assert!((share - 0.8).abs() < 0.03, "Expected about 0.8, got {}", share);
    }

    #[test]
    fn test_weighted_exponent_is_inverse_temperature() {
        // (1 + 1)^(1 / 0.5) : 1 = 4 : 1
        let moves = scored_moves(&[1, 0]);
        let mut policy = PolicyKind::WeightedRandom { temperature: 0.5 }.build(23);
        let share = first_share(&mut policy, &moves, 4000);
        assert!((share - 0.8).abs() < 0.03, "Expected about 0.8, got {}", share);
    }

    #[test]
    fn test_temperature_flattens_and_sharpens() {
        let moves = scored_moves(&[3, 0]);

        let mut hot = PolicyKind::WeightedRandom { temperature: 100.0 }.build(5);
        let share = first_share(&mut hot, &moves, 4000);
        assert!((share - 0.5).abs() < 0.04, "High temperature is near uniform, got {}", share);

        let mut cold = PolicyKind::WeightedRandom { temperature: 0.1 }.build(5);
        let share = first_share(&mut cold, &moves, 4000);
        assert!(share > 0.99, "Low temperature is near greedy, got {}", share);
    }

    #[test]
    fn test_epsilon_one_always_explores() {
        let moves = scored_moves(&[5, 0]);
        let mut policy = PolicyKind::EpsilonGreedy {
            base: Box::new(PolicyKind::Greedy),
            epsilon: 1.0,
        }
        .build(31);
        let share = first_share(&mut policy, &moves, 4000);
        assert!((share - 0.5).abs() < 0.04, "Greedy would always take the first; got {}", share);
    }

    #[test]
    fn test_epsilon_explores_at_its_rate() {
        // Exploring half the time picks the weaker move 0.3 * 0.5 = 15% of the time.
        let moves = scored_moves(&[5, 0]);
        let mut policy = PolicyKind::EpsilonGreedy {
            base: Box::new(PolicyKind::Greedy),
            epsilon: 0.3,
        }
        .build(37);
        let share = first_share(&mut policy, &moves, 4000);
        assert!((share - 0.85).abs() < 0.03, "Expected about 0.85, got {}", share);
    }

    #[test]
    fn test_epsilon_base_samples_independently() {
        // Equal weights: exploring and delegating are each a fair coin, so
        // the first pick of fresh policies splits evenly across seeds.
        let moves = scored_moves(&[2, 2]);
        let kind = PolicyKind::EpsilonGreedy {
            base: Box::new(PolicyKind::WeightedRandom { temperature: 1.0 }),
            epsilon: 0.5,
        };
        let state = GameState::new_game(Some(0));
        let first_picks = (0..2000u64)
            .filter(|&seed| kind.build(seed).select(&state, Some(&moves)).as_ref() == Some(&moves[0]))
            .count();
        let share = first_picks as f64 / 2000.0;
        assert!((share - 0.5).abs() < 0.05, "Expected about 0.5, got {}", share);
    }

    #[test]
    fn test_epsilon_zero_behaves_like_base() {
        let state = GameState::new_game(Some(12));
        let moves = moves_for(&state);
        let mut policy = PolicyKind::EpsilonGreedy {
            base: Box::new(PolicyKind::Greedy),
            epsilon: 0.0,
        }
        .build(7);
        let greedy = Policy::Greedy.select(&state, Some(&moves));
        for _ in 0..5 {
            assert_eq!(policy.select(&state, Some(&moves)), greedy);
        }
    }

    #[test]
    fn test_choose_move_generates_moves() {
        let state = GameState::new_game(Some(2));
        let mut policy = PolicyKind::Random.build(0);
        let chosen = policy.choose_move(&state).unwrap();
        assert!(moves_for(&state).contains(&chosen));
        assert!(random_move(&state, Some(0)).is_some());
    }

    #[test]
    fn test_parse_policy_kinds() {
        assert_eq!("greedy".parse::<PolicyKind>().unwrap(), PolicyKind::Greedy);
        assert_eq!("Random".parse::<PolicyKind>().unwrap(), PolicyKind::Random);
        assert_eq!(
            "weighted".parse::<PolicyKind>().unwrap(),
            PolicyKind::WeightedRandom { temperature: 1.0 }
        );
        assert_eq!(
            "epsilon:0.25:random".parse::<PolicyKind>().unwrap(),
            PolicyKind::EpsilonGreedy {
                base: Box::new(PolicyKind::Random),
                epsilon: 0.25
            }
        );

        let kind = PolicyKind::EpsilonGreedy {
            base: Box::new(PolicyKind::WeightedRandom { temperature: 2.0 }),
            epsilon: 0.1,
        };
        assert_eq!(kind.to_string().parse::<PolicyKind>().unwrap(), kind);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_matches!("minimax".parse::<PolicyKind>(), Err(QwirkleError::Config(_)));
        assert_matches!("weighted:0".parse::<PolicyKind>(), Err(QwirkleError::Config(_)));
        assert_matches!("epsilon".parse::<PolicyKind>(), Err(QwirkleError::Config(_)));
        assert_matches!("epsilon:1.5".parse::<PolicyKind>(), Err(QwirkleError::Config(_)));
    }

    #[test]
    fn test_policy_kind_serde() {
        let kind = PolicyKind::WeightedRandom { temperature: 0.5 };
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"type":"weighted_random","temperature":0.5}"#);
        assert_eq!(serde_json::from_str::<PolicyKind>(&json).unwrap(), kind);
    }
}
