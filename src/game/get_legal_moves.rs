//! Move generation.
//!
//! Single-tile moves are enumerated exhaustively. Multi-tile moves are
//! searched under [`MoveGenLimits`], so on crowded boards some legal moves
//! (even better-scoring ones) can be missed. Every returned move is legal;
//! an empty result does not prove that no legal move exists.

use crate::game::board::{Axis, Board, Placement, Position, ORIGIN};
use crate::game::hand::{Hand, MAX_HAND_SIZE};
use crate::game::tile::Tile;
use crate::rules::validation::validate;
use crate::scoring::scoring::score_move;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A legal placement set and what it would earn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub placements: Vec<Placement>,
    pub score: u32,
    pub bonus_lines: u32,
}

impl Move {
    pub fn tiles(&self) -> Vec<Tile> {
        self.placements.iter().map(|&(_, tile)| tile).collect()
    }

    /// Order-independent identity of the move.
    fn key(&self) -> Vec<Placement> {
        let mut key = self.placements.clone();
        key.sort();
        key
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiles = self
            .placements
            .iter()
            .map(|(pos, tile)| format!("{}@{:?}", tile, pos))
            .join(", ");
        write!(f, "Move({}, score={})", tiles, self.score)
    }
}

/// Bounds on the multi-tile search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveGenLimits {
    /// Most tiles placed in one move.
    /// Default: 6
    pub max_tiles: usize,

    /// Empty cells explored on each side of a starting cell.
    /// Default: 5
    pub max_extend: usize,

    /// Candidate placements tried per starting cell and axis.
    /// Default: 20
    pub max_combinations_per_start: usize,

    /// Multi-tile moves kept before deduplication.
    /// Default: 100
    pub max_multi_moves: usize,
}

impl Default for MoveGenLimits {
    fn default() -> Self {
        Self {
            max_tiles: MAX_HAND_SIZE,
            max_extend: 5,
            max_combinations_per_start: 20,
            max_multi_moves: 100,
        }
    }
}

/// Cells where a tile could go: the origin on an empty board, otherwise
/// every empty cell next to a tile. Sorted so the search order is stable.
pub fn candidate_positions(board: &Board) -> Vec<Position> {
    if board.is_empty() {
        return vec![ORIGIN];
    }

    let mut candidates = BTreeSet::new();
    for pos in board.positions() {
        for neighbor in Board::neighbor_positions(pos) {
            if !board.is_occupied(neighbor) {
                candidates.insert(neighbor);
            }
        }
    }
    candidates.into_iter().collect()
}

/// One move per distinct tile value and legal cell.
pub fn single_tile_moves(board: &Board, hand: &Hand, is_first_move: bool) -> Vec<Move> {
    let positions = candidate_positions(board);
    let mut moves = Vec::new();

    for tile in hand.distinct_tiles() {
        for &pos in &positions {
            let placements = vec![(pos, tile)];
            if validate(board, &placements, is_first_move).is_ok() {
                let (score, bonus_lines) = score_move(board, &placements);
                moves.push(Move {
                    placements,
                    score,
                    bonus_lines,
                });
            }
        }
    }

    moves
}

/// Moves of two or more tiles, bounded by `limits`.
pub fn multi_tile_moves(
    board: &Board,
    hand: &Hand,
    is_first_move: bool,
    limits: &MoveGenLimits,
) -> Vec<Move> {
    let tiles = hand.tiles();
    if tiles.len() < 2 || limits.max_tiles < 2 {
        return Vec::new();
    }

    if is_first_move {
        return first_move_lines(tiles, limits.max_tiles);
    }

    let mut moves = Vec::new();
    for start in candidate_positions(board) {
        if moves.len() >= limits.max_multi_moves {
            break;
        }
        moves.extend(lines_from_position(board, tiles, start, Axis::Horizontal, limits));

        if moves.len() >= limits.max_multi_moves {
            break;
        }
        moves.extend(lines_from_position(board, tiles, start, Axis::Vertical, limits));
    }

    moves.truncate(limits.max_multi_moves);
    deduplicate(moves)
}

/// Every subset of the hand laid out as a row from the origin.
fn first_move_lines(tiles: &[Tile], max_tiles: usize) -> Vec<Move> {
    let board = Board::new();
    let mut moves = Vec::new();

    for size in 2..=tiles.len().min(max_tiles) {
        for combo in (0..tiles.len()).combinations(size) {
            let placements: Vec<Placement> = combo
                .iter()
                .enumerate()
                .map(|(offset, &i)| ((0, offset as i32), tiles[i]))
                .collect();
            if validate(&board, &placements, true).is_ok() {
                let (score, bonus_lines) = score_move(&board, &placements);
                moves.push(Move {
                    placements,
                    score,
                    bonus_lines,
                });
            }
        }
    }

    moves
}

/// Empty cells walking away from `start` in `direction` (-1 or 1), nearest first.
fn extension_positions(
    board: &Board,
    start: Position,
    axis: Axis,
    direction: i32,
    max_extend: usize,
) -> Vec<Position> {
    let mut positions = Vec::new();
    let mut current = axis.offset(start, direction);
    while !board.is_occupied(current) && positions.len() < max_extend {
        positions.push(current);
        current = axis.offset(current, direction);
    }
    positions
}

fn lines_from_position(
    board: &Board,
    tiles: &[Tile],
    start: Position,
    axis: Axis,
    limits: &MoveGenLimits,
) -> Vec<Move> {
    let mut moves = Vec::new();
    if board.is_occupied(start) {
        return moves;
    }

    let mut run: Vec<Position> = extension_positions(board, start, axis, -1, limits.max_extend)
        .into_iter()
        .rev()
        .collect();
    let start_index = run.len();
    run.push(start);
    run.extend(extension_positions(board, start, axis, 1, limits.max_extend));

    // Keep at most `max_tiles` cells, centered on the start.
    if run.len() > limits.max_tiles {
        let before = start_index.min(limits.max_tiles / 2);
        let after = (run.len() - start_index - 1).min(limits.max_tiles.saturating_sub(before + 1));
        run = run[start_index - before..=start_index + after].to_vec();
    }

    let mut tried = 0;
    let max_size = tiles.len().min(run.len()).min(limits.max_tiles);
    for size in 2..=max_size {
        for combo in (0..tiles.len()).combinations(size) {
            if tried >= limits.max_combinations_per_start {
                return moves;
            }
            let selected: Vec<Tile> = combo.iter().map(|&i| tiles[i]).collect();

            for window in run.windows(size) {
                if !window.iter().any(|&pos| board.has_neighbor(pos)) {
                    continue;
                }
                tried += 1;
                if tried > limits.max_combinations_per_start {
                    return moves;
                }

                let placements: Vec<Placement> =
                    window.iter().copied().zip(selected.iter().copied()).collect();
                if validate(board, &placements, false).is_ok() {
                    let (score, bonus_lines) = score_move(board, &placements);
                    moves.push(Move {
                        placements,
                        score,
                        bonus_lines,
                    });
                }
            }
        }
    }

    moves
}

/// Drops moves that place the same tiles on the same cells in another order.
fn deduplicate(moves: Vec<Move>) -> Vec<Move> {
    let mut seen = HashSet::new();
    moves.into_iter().filter(|m| seen.insert(m.key())).collect()
}

/// All moves found for `hand`, best `(score, bonus_lines)` first.
pub fn get_legal_moves(board: &Board, hand: &Hand, is_first_move: bool) -> Vec<Move> {
    get_legal_moves_with_limits(board, hand, is_first_move, &MoveGenLimits::default())
}

pub fn get_legal_moves_with_limits(
    board: &Board,
    hand: &Hand,
    is_first_move: bool,
    limits: &MoveGenLimits,
) -> Vec<Move> {
    let mut moves = single_tile_moves(board, hand, is_first_move);
    moves.extend(multi_tile_moves(board, hand, is_first_move, limits));

    let mut moves = deduplicate(moves);
    moves.sort_by(|a, b| (b.score, b.bonus_lines).cmp(&(a.score, a.bonus_lines)));

    log::trace!("Generated {} moves for a hand of {}", moves.len(), hand.len());
    moves
}
