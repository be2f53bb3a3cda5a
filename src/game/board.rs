//! Sparse, unbounded board.
//!
//! Cells live in a copy-on-write map: cloning a `Board` shares storage until
//! one side writes, at which point the writer gets its own copy. The move
//! generator and the Monte Carlo estimator clone boards constantly and most of
//! those clones are only read.

use crate::error::Rejection;
use crate::game::tile::Tile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// `(row, col)`. Rows grow downwards, columns to the right.
pub type Position = (i32, i32);

/// A tile destined for (or sitting on) a position.
pub type Placement = (Position, Tile);

pub const ORIGIN: Position = (0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Unit step `(d_row, d_col)` along the axis.
    pub fn step(self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
        }
    }

    pub fn offset(self, pos: Position, distance: i32) -> Position {
        let (dr, dc) = self.step();
        (pos.0 + dr * distance, pos.1 + dc * distance)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Placement>", into = "Vec<Placement>")]
pub struct Board {
    cells: Arc<HashMap<Position, Tile>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.cells.get(&pos).copied()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    /// True when no tile has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }

    /// Places a tile. Occupied cells are rejected.
    pub fn place(&mut self, pos: Position, tile: Tile) -> Result<(), Rejection> {
        if self.is_occupied(pos) {
            return Err(Rejection::Occupied(pos));
        }
        Arc::make_mut(&mut self.cells).insert(pos, tile);
        Ok(())
    }

    /// Scratch copy with `placements` applied. Cells that are already occupied
    /// keep their tile; callers validate occupancy beforehand.
    pub fn overlay(&self, placements: &[Placement]) -> Board {
        let mut scratch = self.clone();
        if placements.is_empty() {
            return scratch;
        }
        let cells = Arc::make_mut(&mut scratch.cells);
        for &(pos, tile) in placements {
            cells.entry(pos).or_insert(tile);
        }
        scratch
    }

    /// Up, down, left, right.
    pub fn neighbor_positions(pos: Position) -> [Position; 4] {
        let (row, col) = pos;
        [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
    }

    /// Tiles around `pos`, in the same order as [`Board::neighbor_positions`].
    pub fn neighbors(&self, pos: Position) -> [Option<Tile>; 4] {
        Self::neighbor_positions(pos).map(|n| self.get(n))
    }

    pub fn has_neighbor(&self, pos: Position) -> bool {
        Self::neighbor_positions(pos)
            .iter()
            .any(|&n| self.is_occupied(n))
    }

    /// `(min_row, max_row, min_col, max_col)` of occupied cells.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let mut positions = self.cells.keys();
        let &(row, col) = positions.next()?;
        let init = (row, row, col, col);
        Some(positions.fold(init, |(r0, r1, c0, c1), &(r, c)| {
            (r0.min(r), r1.max(r), c0.min(c), c1.max(c))
        }))
    }

    /// The maximal contiguous run through `pos` along `axis`, in increasing
    /// row/column order. Empty when `pos` itself is empty.
    pub fn line(&self, pos: Position, axis: Axis) -> Vec<Placement> {
        if !self.is_occupied(pos) {
            return Vec::new();
        }
        let mut start = pos;
        while self.is_occupied(axis.offset(start, -1)) {
            start = axis.offset(start, -1);
        }
        let mut line = Vec::new();
        let mut current = start;
        while let Some(tile) = self.get(current) {
            line.push((current, tile));
            current = axis.offset(current, 1);
        }
        line
    }

    pub fn horizontal_line(&self, pos: Position) -> Vec<Placement> {
        self.line(pos, Axis::Horizontal)
    }

    pub fn vertical_line(&self, pos: Position) -> Vec<Placement> {
        self.line(pos, Axis::Vertical)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Placement> + '_ {
        self.cells.iter().map(|(&pos, &tile)| (pos, tile))
    }

    /// Whether two boards still share the same storage (no write since clone).
    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Board) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

impl From<Vec<Placement>> for Board {
    fn from(placements: Vec<Placement>) -> Self {
        Board {
            cells: Arc::new(placements.into_iter().collect()),
        }
    }
}

impl From<Board> for Vec<Placement> {
    fn from(board: Board) -> Self {
        let mut placements: Vec<Placement> = board.iter().collect();
        placements.sort_by_key(|&(pos, _)| pos);
        placements
    }
}
