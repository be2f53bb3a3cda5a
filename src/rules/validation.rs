use crate::error::Rejection;
use crate::game::board::{Board, Placement, Position};
use crate::rules::lines::{affected_lines, collinear_axis, is_valid_line};
use std::collections::HashSet;

/// Checks a placement set against `board` without touching it.
///
/// Checks run in a fixed order and the first failure is returned:
/// non-empty, free and distinct targets, one row or column, one contiguous
/// run, connection to a pre-existing tile (skipped on the first move), and
/// finally every line of two or more tiles through a placed cell.
pub fn validate(
    board: &Board,
    placements: &[Placement],
    is_first_move: bool,
) -> Result<(), Rejection> {
    if placements.is_empty() {
        return Err(Rejection::Empty);
    }

    let positions: Vec<Position> = placements.iter().map(|&(pos, _)| pos).collect();

    let mut targeted = HashSet::with_capacity(positions.len());
    for &pos in &positions {
        if board.is_occupied(pos) {
            return Err(Rejection::Occupied(pos));
        }
        if !targeted.insert(pos) {
            return Err(Rejection::DuplicatePosition(pos));
        }
    }

    let axis = collinear_axis(&positions).ok_or(Rejection::NotSameLine)?;

    let scratch = board.overlay(placements);

    // Every placed cell must sit in the run through the first one.
    let run: HashSet<Position> = scratch
        .line(positions[0], axis)
        .into_iter()
        .map(|(pos, _)| pos)
        .collect();
    if !positions.iter().all(|pos| run.contains(pos)) {
        return Err(Rejection::NotContiguous);
    }

    if !is_first_move {
        let connected = positions.iter().any(|&pos| {
            Board::neighbor_positions(pos)
                .iter()
                .any(|&n| !targeted.contains(&n) && board.is_occupied(n))
        });
        if !connected {
            return Err(Rejection::Disconnected);
        }
    }

    for line in affected_lines(&scratch, &positions) {
        let tiles: Vec<_> = line.iter().map(|&(_, tile)| tile).collect();
        if !is_valid_line(&tiles) {
            return Err(Rejection::InvalidLine);
        }
    }

    Ok(())
}
