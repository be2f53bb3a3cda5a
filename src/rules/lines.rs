use crate::game::board::{Axis, Board, Placement, Position};
use crate::game::tile::Tile;
use std::collections::HashSet;

/// Longest legal line.
pub const MAX_LINE_LENGTH: usize = 6;

/// A line is valid when it has at most six tiles, no duplicates, and shares
/// exactly one attribute. Lines of zero or one tile are trivially valid.
pub fn is_valid_line(tiles: &[Tile]) -> bool {
    if tiles.len() <= 1 {
        return true;
    }
    if tiles.len() > MAX_LINE_LENGTH {
        return false;
    }

    let unique: HashSet<&Tile> = tiles.iter().collect();
    if unique.len() != tiles.len() {
        return false;
    }

    let first = tiles[0];
    let same_color = tiles.iter().all(|t| t.color == first.color);
    let same_shape = tiles.iter().all(|t| t.shape == first.shape);

    // Without duplicates both cannot hold; neither holding is a mixed line.
    same_color != same_shape
}

/// The axis shared by every position, or `None` when they span both a
/// row and a column. Zero or one position counts as horizontal.
pub fn collinear_axis(positions: &[Position]) -> Option<Axis> {
    let Some(&(row, col)) = positions.first() else {
        return Some(Axis::Horizontal);
    };
    if positions.iter().all(|&(r, _)| r == row) {
        Some(Axis::Horizontal)
    } else if positions.iter().all(|&(_, c)| c == col) {
        Some(Axis::Vertical)
    } else {
        None
    }
}

/// Every line of two or more tiles running through any of `positions` on a
/// board that already holds the placed tiles. Each line is reported once.
pub fn affected_lines(board: &Board, positions: &[Position]) -> Vec<Vec<Placement>> {
    let mut seen: HashSet<(Axis, Position)> = HashSet::new();
    let mut lines = Vec::new();

    for &pos in positions {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let line = board.line(pos, axis);
            if line.len() < 2 {
                continue;
            }
            // A maximal line is identified by its axis and first cell.
            if seen.insert((axis, line[0].0)) {
                lines.push(line);
            }
        }
    }

    lines
}
