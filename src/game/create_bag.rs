use crate::game::bag::Bag;
use crate::game::tile::{Color, Shape, Tile};

/// Copies of each shape/color combination in a full set.
pub const COPIES_PER_TILE: usize = 3;

/// Size of a full set: 6 shapes × 6 colors × 3 copies.
pub const TOTAL_TILES: usize = Shape::ALL.len() * Color::ALL.len() * COPIES_PER_TILE;

/// Every tile of a full set, in a fixed (unshuffled) order.
pub fn full_tile_set() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(TOTAL_TILES);
    for shape in Shape::ALL {
        for color in Color::ALL {
            for _ in 0..COPIES_PER_TILE {
                tiles.push(Tile::new(shape, color));
            }
        }
    }
    tiles
}

/// Creates a shuffled bag holding the full set.
pub fn create_bag(seed: u64) -> Bag {
    Bag::from_tiles(full_tile_set(), seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tile_set_has_108_tiles() {
        let tiles = full_tile_set();
        assert_eq!(
            tiles.len(),
            108,
            "The set should contain exactly 108 tiles, but found {}.",
            tiles.len()
        );
    }

    #[test]
    fn test_each_tile_appears_three_times() {
        let tiles = full_tile_set();
        let red_circle = Tile::new(Shape::Circle, Color::Red);
        assert_eq!(tiles.iter().filter(|&&t| t == red_circle).count(), 3);

        let purple_cross = Tile::new(Shape::Cross, Color::Purple);
        assert_eq!(tiles.iter().filter(|&&t| t == purple_cross).count(), 3);
    }

    #[test]
    fn test_create_bag_is_full() {
        let bag = create_bag(7);
        assert_eq!(bag.remaining(), TOTAL_TILES);
    }
}
