use crate::error::{GameError, HandError};
use crate::game::bag::Bag;
use crate::game::board::{Board, Placement};
use crate::game::create_bag::create_bag;
use crate::game::hand::Hand;
use crate::game::tile::Tile;
use crate::rules::validation::validate;
use crate::scoring::scoring::{score_move, END_GAME_BONUS};
use serde::{Deserialize, Serialize};

pub const NUM_PLAYERS: usize = 2;

/// Authoritative state of one game.
///
/// Only [`GameState::apply_move`], [`GameState::apply_swap`] and
/// [`GameState::force_end`] change it. A rejected action leaves it exactly
/// as it was. `Clone` is a full independent copy (the board shares storage
/// copy-on-write).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) bag: Bag,
    pub(crate) hands: [Hand; NUM_PLAYERS],
    pub(crate) scores: [u32; NUM_PLAYERS],
    pub(crate) bonus_lines: [u32; NUM_PLAYERS],
    pub(crate) current_player: usize,
    pub(crate) turn_number: u32,
    pub(crate) game_over: bool,
    pub(crate) winner: Option<usize>,
}

impl GameState {
    /// Shuffles a full bag and deals six tiles to each player.
    /// Without a seed, one is drawn from the thread RNG.
    pub fn new_game(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut bag = create_bag(seed);
        let mut hands = [Hand::default(), Hand::default()];
        for hand in hands.iter_mut() {
            hand.refill(&mut bag);
        }
        log::debug!("🎲 New game (seed {})", seed);

        GameState {
            board: Board::new(),
            bag,
            hands,
            scores: [0; NUM_PLAYERS],
            bonus_lines: [0; NUM_PLAYERS],
            current_player: 0,
            turn_number: 1,
            game_over: false,
            winner: None,
        }
    }

    /// Builds a mid-game position, e.g. a puzzle or a state restored by an
    /// outer layer. Fails if a hand is over-full.
    pub fn from_parts(
        board: Board,
        bag: Bag,
        hands: [Vec<Tile>; NUM_PLAYERS],
        scores: [u32; NUM_PLAYERS],
        current_player: usize,
    ) -> Result<Self, HandError> {
        let [first, second] = hands;
        Ok(GameState {
            board,
            bag,
            hands: [Hand::new(first)?, Hand::new(second)?],
            scores,
            bonus_lines: [0; NUM_PLAYERS],
            current_player: current_player % NUM_PLAYERS,
            turn_number: 1,
            game_over: false,
            winner: None,
        })
    }

    /// Plays `placements` for the current player and returns the points
    /// scored (without the end-game bonus).
    pub fn apply_move(&mut self, placements: &[Placement]) -> Result<u32, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if placements.is_empty() {
            return Err(GameError::NoPlacements);
        }

        let player = self.current_player;
        let tiles: Vec<Tile> = placements.iter().map(|&(_, tile)| tile).collect();
        if let Some(missing) = self.hands[player].first_missing(&tiles) {
            return Err(GameError::TileNotHeld(missing));
        }

        validate(&self.board, placements, self.is_first_move())?;
        let (points, bonus_lines) = score_move(&self.board, placements);

        self.hands[player].remove(&tiles)?;
        self.board = self.board.overlay(placements);
        self.scores[player] += points;
        self.bonus_lines[player] += bonus_lines;
        log::trace!(
            "Player {} placed {} tile(s) for {} points",
            player,
            tiles.len(),
            points
        );

        if self.hands[player].is_empty() && self.bag.is_empty() {
            self.scores[player] += END_GAME_BONUS;
            self.end_game();
        } else {
            self.hands[player].refill(&mut self.bag);
            self.advance_turn();
        }

        Ok(points)
    }

    /// Trades `tiles` for the same number from the bag. Replacements are drawn
    /// before the traded tiles go back in, so a player never redraws them.
    pub fn apply_swap(&mut self, tiles: &[Tile]) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if tiles.is_empty() {
            return Err(GameError::NoSwapTiles);
        }
        if self.bag.is_empty() {
            return Err(GameError::BagEmpty);
        }

        let player = self.current_player;
        if let Some(missing) = self.hands[player].first_missing(tiles) {
            return Err(GameError::TileNotHeld(missing));
        }
        if self.bag.remaining() < tiles.len() {
            return Err(GameError::BagShort {
                available: self.bag.remaining(),
                requested: tiles.len(),
            });
        }

        self.hands[player].remove(tiles)?;
        let drawn = self.bag.draw(tiles.len());
        self.hands[player].add(&drawn)?;
        self.bag.return_tiles(tiles);
        log::trace!("Player {} swapped {} tile(s)", player, tiles.len());

        self.advance_turn();
        Ok(())
    }

    /// Ends a game nobody can continue (no move and no swap). The winner is
    /// decided on the current scores.
    pub fn force_end(&mut self) {
        if !self.game_over {
            log::debug!("Game stalled on turn {}, ending it", self.turn_number);
            self.end_game();
        }
    }

    fn advance_turn(&mut self) {
        self.current_player = 1 - self.current_player;
        self.turn_number += 1;

        if self.hands[self.current_player].is_empty() && self.bag.is_empty() {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.game_over = true;
        self.winner = self.leader();
        log::debug!(
            "🏁 Game over after {} turns: {} - {} (winner {:?})",
            self.turn_number,
            self.scores[0],
            self.scores[1],
            self.winner
        );
    }

    /// Player ahead on points, `None` when level.
    pub fn leader(&self) -> Option<usize> {
        match self.scores[0].cmp(&self.scores[1]) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn bag_remaining(&self) -> usize {
        self.bag.remaining()
    }

    /// # Panics
    ///
    /// If `player` is not 0 or 1.
    pub fn hand(&self, player: usize) -> &Hand {
        &self.hands[player]
    }

    pub fn current_hand(&self) -> &Hand {
        &self.hands[self.current_player]
    }

    pub fn scores(&self) -> [u32; NUM_PLAYERS] {
        self.scores
    }

    /// # Panics
    ///
    /// If `player` is not 0 or 1.
    pub fn score(&self, player: usize) -> u32 {
        self.scores[player]
    }

    pub fn current_score(&self) -> u32 {
        self.scores[self.current_player]
    }

    pub fn bonus_lines(&self) -> [u32; NUM_PLAYERS] {
        self.bonus_lines
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Winner of a finished game; `None` for a tie or a game in progress.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_first_move(&self) -> bool {
        self.board.is_empty()
    }

    /// Whether the current player holds tiles in a live game. Says nothing
    /// about whether a legal move exists.
    pub fn can_play(&self) -> bool {
        !self.game_over && !self.current_hand().is_empty()
    }

    pub fn can_swap(&self) -> bool {
        !self.game_over && !self.bag.is_empty() && !self.current_hand().is_empty()
    }

    /// Tiles across bag, hands and board. Always a full set during a game.
    pub fn tile_total(&self) -> usize {
        self.bag.remaining()
            + self.hands.iter().map(Hand::len).sum::<usize>()
            + self.board.tile_count()
    }
}
