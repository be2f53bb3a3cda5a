use crate::game::game_state::NUM_PLAYERS;
use crate::simulation::runner::GameResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Width of a score-distribution bucket.
pub const BUCKET_WIDTH: u32 = 10;

/// Summary of a batch of games. Win rates are percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub n_games: usize,
    pub wins: [usize; NUM_PLAYERS],
    pub ties: usize,
    pub win_rate: [f64; NUM_PLAYERS],
    pub avg_score: [f64; NUM_PLAYERS],
    /// Sample standard deviation, 0 with fewer than two games.
    pub score_std: [f64; NUM_PLAYERS],
    pub median_score: [f64; NUM_PLAYERS],
    pub avg_turns: f64,
    pub avg_bonus_lines: [f64; NUM_PLAYERS],
    pub max_score: u32,
    pub max_turn_score: u32,
    /// Games cut off by the turn ceiling or forced to end.
    pub unfinished: usize,
}

pub fn compute_stats(results: &[GameResult]) -> AggregateStats {
    if results.is_empty() {
        return AggregateStats::default();
    }

    let n = results.len();
    let mut stats = AggregateStats {
        n_games: n,
        ties: results.iter().filter(|r| r.winner.is_none()).count(),
        avg_turns: mean(&results.iter().map(|r| r.turns as f64).collect::<Vec<_>>()),
        max_score: results
            .iter()
            .flat_map(|r| r.scores)
            .max()
            .unwrap_or(0),
        max_turn_score: results.iter().map(|r| r.max_turn_score).max().unwrap_or(0),
        unfinished: results.iter().filter(|r| !r.completed).count(),
        ..AggregateStats::default()
    };

    for player in 0..NUM_PLAYERS {
        let scores: Vec<f64> = results.iter().map(|r| r.scores[player] as f64).collect();
        let bonus: Vec<f64> = results.iter().map(|r| r.bonus_lines[player] as f64).collect();

        stats.wins[player] = results.iter().filter(|r| r.winner == Some(player)).count();
        stats.win_rate[player] = stats.wins[player] as f64 / n as f64 * 100.0;
        stats.avg_score[player] = mean(&scores);
        stats.score_std[player] = sample_std(&scores);
        stats.median_score[player] = median(&scores);
        stats.avg_bonus_lines[player] = mean(&bonus);
    }

    stats
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

impl fmt::Display for AggregateStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games Played: {}", self.n_games)?;
        writeln!(f)?;
        writeln!(f, "Win Rates:")?;
        for player in 0..NUM_PLAYERS {
            writeln!(
                f,
                "  Player {}: {:.1}% ({} wins)",
                player + 1,
                self.win_rate[player],
                self.wins[player]
            )?;
        }
        writeln!(f, "  Ties: {}", self.ties)?;
        writeln!(f)?;
        writeln!(f, "Scores:")?;
        for player in 0..NUM_PLAYERS {
            writeln!(
                f,
                "  Player {}: {:.1} avg (±{:.1}), median {:.0}",
                player + 1,
                self.avg_score[player],
                self.score_std[player],
                self.median_score[player]
            )?;
        }
        writeln!(f, "  Max Score: {}", self.max_score)?;
        writeln!(f, "  Max Turn Score: {}", self.max_turn_score)?;
        writeln!(f)?;
        writeln!(f, "Game Length:")?;
        writeln!(f, "  Average Turns: {:.1}", self.avg_turns)?;
        if self.unfinished > 0 {
            writeln!(f, "  Unfinished: {}", self.unfinished)?;
        }
        writeln!(f)?;
        writeln!(f, "Bonus Lines:")?;
        for player in 0..NUM_PLAYERS {
            writeln!(
                f,
                "  Player {}: {:.2} avg per game",
                player + 1,
                self.avg_bonus_lines[player]
            )?;
        }
        Ok(())
    }
}

/// Start of the bucket holding `score`.
pub fn bucket_start(score: u32) -> u32 {
    score / BUCKET_WIDTH * BUCKET_WIDTH
}

/// Label such as `"40-49"`.
pub fn bucket_label(start: u32) -> String {
    format!("{}-{}", start, start + BUCKET_WIDTH - 1)
}

/// Per-player count of final scores by bucket start.
pub fn score_distribution(results: &[GameResult]) -> [BTreeMap<u32, usize>; NUM_PLAYERS] {
    let mut distribution: [BTreeMap<u32, usize>; NUM_PLAYERS] = Default::default();
    for result in results {
        for (player, buckets) in distribution.iter_mut().enumerate() {
            *buckets.entry(bucket_start(result.scores[player])).or_insert(0) += 1;
        }
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(index: usize, scores: [u32; 2], winner: Option<usize>) -> GameResult {
        GameResult {
            index,
            seed: index as u64,
            winner,
            scores,
            turns: 20 + index as u32,
            bonus_lines: [1, 0],
            max_turn_score: 10 + index as u32,
            max_turn_player: Some(0),
            completed: true,
        }
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(compute_stats(&[]), AggregateStats::default());
    }

    #[test]
    fn test_compute_stats() {
        let results = vec![
            result(0, [40, 30], Some(0)),
            result(1, [20, 50], Some(1)),
            result(2, [35, 35], None),
            result(3, [45, 25], Some(0)),
        ];
        let stats = compute_stats(&results);

        assert_eq!(stats.n_games, 4);
        assert_eq!(stats.wins, [2, 1]);
        assert_eq!(stats.ties, 1);
        assert!((stats.win_rate[0] - 50.0).abs() < 1e-9);
        assert!((stats.win_rate[1] - 25.0).abs() < 1e-9);
        assert!((stats.avg_score[0] - 35.0).abs() < 1e-9);
        assert!((stats.median_score[0] - 37.5).abs() < 1e-9, "Even count averages the middle pair");
        assert!((stats.avg_turns - 21.5).abs() < 1e-9);
        assert!((stats.avg_bonus_lines[0] - 1.0).abs() < 1e-9);
        assert_eq!(stats.max_score, 50);
        assert_eq!(stats.max_turn_score, 13);
        assert_eq!(stats.unfinished, 0);

        // Player 0 scores 40, 20, 35, 45: squared deviations sum to 350, / 3.
        let expected_std = (350.0f64 / 3.0).sqrt();
        assert!((stats.score_std[0] - expected_std).abs() < 1e-9);
    }

    #[test]
    fn test_single_game_has_zero_std() {
        let stats = compute_stats(&[result(0, [12, 7], Some(0))]);
        assert_eq!(stats.score_std, [0.0, 0.0]);
        assert_eq!(stats.median_score, [12.0, 7.0]);
    }

    #[test]
    fn test_report_mentions_win_rates() {
        let stats = compute_stats(&[result(0, [40, 30], Some(0))]);
        let report = stats.to_string();
        assert!(report.contains("Games Played: 1"));
        assert!(report.contains("Player 1: 100.0% (1 wins)"));
        assert!(report.contains("Max Score: 40"));
    }

    #[test]
    fn test_score_distribution_buckets() {
        let results = vec![
            result(0, [40, 9], Some(0)),
            result(1, [49, 10], Some(0)),
            result(2, [51, 19], Some(0)),
        ];
        let [p0, p1] = score_distribution(&results);
        assert_eq!(p0.get(&40), Some(&2));
        assert_eq!(p0.get(&50), Some(&1));
        assert_eq!(p1.get(&0), Some(&1));
        assert_eq!(p1.get(&10), Some(&2));
        assert_eq!(bucket_label(40), "40-49");
    }
}
