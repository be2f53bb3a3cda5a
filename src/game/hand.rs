use crate::error::HandError;
use crate::game::bag::Bag;
use crate::game::tile::Tile;
use serde::{Deserialize, Serialize};

/// Most tiles a player may hold.
pub const MAX_HAND_SIZE: usize = 6;

/// A player's tiles. Order is kept for display; rules treat it as a multiset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    pub fn new(tiles: Vec<Tile>) -> Result<Self, HandError> {
        if tiles.len() > MAX_HAND_SIZE {
            return Err(HandError::Overflow {
                held: 0,
                adding: tiles.len(),
            });
        }
        Ok(Hand { tiles })
    }

    pub fn add(&mut self, tiles: &[Tile]) -> Result<(), HandError> {
        if self.tiles.len() + tiles.len() > MAX_HAND_SIZE {
            return Err(HandError::Overflow {
                held: self.tiles.len(),
                adding: tiles.len(),
            });
        }
        self.tiles.extend_from_slice(tiles);
        Ok(())
    }

    /// Removes one copy per requested tile. Atomic: if any tile is missing,
    /// the hand is left untouched.
    pub fn remove(&mut self, tiles: &[Tile]) -> Result<(), HandError> {
        let mut remaining = self.tiles.clone();
        for tile in tiles {
            match remaining.iter().position(|t| t == tile) {
                Some(index) => {
                    remaining.remove(index);
                }
                None => return Err(HandError::MissingTile(*tile)),
            }
        }
        self.tiles = remaining;
        Ok(())
    }

    /// Draws from `bag` until the hand is full or the bag is empty.
    /// Returns the number of tiles drawn.
    pub fn refill(&mut self, bag: &mut Bag) -> usize {
        let needed = MAX_HAND_SIZE.saturating_sub(self.tiles.len());
        if needed == 0 {
            return 0;
        }
        let drawn = bag.draw(needed);
        self.tiles.extend_from_slice(&drawn);
        drawn.len()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// One representative per tile value, in first-seen order.
    pub fn distinct_tiles(&self) -> Vec<Tile> {
        let mut seen = Vec::with_capacity(self.tiles.len());
        for tile in &self.tiles {
            if !seen.contains(tile) {
                seen.push(*tile);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles.contains(tile)
    }

    pub fn count(&self, tile: &Tile) -> usize {
        self.tiles.iter().filter(|t| *t == tile).count()
    }

    /// Multiset containment: every requested copy must be held.
    pub fn contains_all(&self, tiles: &[Tile]) -> bool {
        self.first_missing(tiles).is_none()
    }

    /// First requested tile the hand cannot supply, counting copies.
    pub fn first_missing(&self, tiles: &[Tile]) -> Option<Tile> {
        let mut pool = self.tiles.clone();
        for tile in tiles {
            match pool.iter().position(|t| t == tile) {
                Some(index) => {
                    pool.swap_remove(index);
                }
                None => return Some(*tile),
            }
        }
        None
    }
}
