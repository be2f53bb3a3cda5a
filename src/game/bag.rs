use crate::game::tile::Tile;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Pool of undrawn tiles with its own shuffling stream.
///
/// The random stream is seeded once on construction and never reseeded, so a
/// game replays identically from the same seed. It is not serialized: a
/// deserialized bag gets a fresh stream seeded with zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    tiles: Vec<Tile>,
    #[serde(skip, default = "unseeded_rng")]
    rng: StdRng,
}

fn unseeded_rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

impl Bag {
    /// Builds a bag holding `tiles`, shuffled with a stream seeded from `seed`.
    pub fn from_tiles(tiles: Vec<Tile>, seed: u64) -> Self {
        let mut bag = Bag {
            tiles,
            rng: StdRng::seed_from_u64(seed),
        };
        bag.tiles.shuffle(&mut bag.rng);
        bag
    }

    /// Draws up to `n` tiles. Returns fewer when the bag runs low.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let n = n.min(self.tiles.len());
        self.tiles.drain(..n).collect()
    }

    /// Puts tiles back and reshuffles the whole bag.
    pub fn return_tiles(&mut self, tiles: &[Tile]) {
        self.tiles.extend_from_slice(tiles);
        self.tiles.shuffle(&mut self.rng);
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Get a reference to the tiles in the bag, in draw order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::create_bag::{create_bag, full_tile_set};
    use crate::game::tile::{Color, Shape};

    #[test]
    fn test_draw_reduces_remaining() {
        let mut bag = create_bag(1);
        let drawn = bag.draw(6);
        assert_eq!(drawn.len(), 6);
        assert_eq!(bag.remaining(), 102);
    }

    #[test]
    fn test_draw_more_than_remaining_returns_fewer() {
        let tiles = vec![
            Tile::new(Shape::Circle, Color::Red),
            Tile::new(Shape::Square, Color::Red),
        ];
        let mut bag = Bag::from_tiles(tiles, 3);
        let drawn = bag.draw(6);
        assert_eq!(drawn.len(), 2);
        assert!(bag.is_empty());
        assert!(bag.draw(1).is_empty(), "Drawing from an empty bag never fails");
    }

    #[test]
    fn test_return_tiles_refills() {
        let mut bag = create_bag(2);
        let drawn = bag.draw(3);
        bag.return_tiles(&drawn);
        assert_eq!(bag.remaining(), 108);
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = create_bag(42);
        let b = create_bag(42);
        assert_eq!(a.tiles(), b.tiles());

        let c = create_bag(43);
        assert_ne!(a.tiles(), c.tiles(), "Different seeds should shuffle differently");
    }

    #[test]
    fn test_shuffle_preserves_contents() {
        let bag = create_bag(9);
        let mut shuffled = bag.tiles().to_vec();
        let mut reference = full_tile_set();
        shuffled.sort();
        reference.sort();
        assert_eq!(shuffled, reference);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut bag = create_bag(5);
        let copy = bag.clone();
        bag.draw(10);
        assert_eq!(copy.remaining(), 108);
        assert_eq!(bag.remaining(), 98);
    }
}
