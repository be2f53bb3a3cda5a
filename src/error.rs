use crate::game::board::Position;
use crate::game::tile::Tile;

/// Why a placement set is illegal. Expected during play; the caller may retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Must place at least one tile")]
    Empty,

    #[error("Position {0:?} is already occupied")]
    Occupied(Position),

    #[error("Position {0:?} is targeted more than once")]
    DuplicatePosition(Position),

    #[error("All tiles must be placed in the same row or column")]
    NotSameLine,

    #[error("Tiles must be placed in a contiguous line")]
    NotContiguous,

    #[error("Tiles must connect to existing tiles on the board")]
    Disconnected,

    #[error("Invalid line: tiles must share exactly one attribute with no duplicates")]
    InvalidLine,
}

/// Misuse of a hand. These signal a caller bug rather than a rule violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandError {
    #[error("Hand cannot exceed 6 tiles (holding {held}, adding {adding})")]
    Overflow { held: usize, adding: usize },

    #[error("Tile {0} not in hand")]
    MissingTile(Tile),
}

/// Rejected turn action. The game state is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Game is already over")]
    GameOver,

    #[error("Must place at least one tile")]
    NoPlacements,

    #[error("Must swap at least one tile")]
    NoSwapTiles,

    #[error("Player does not have tile: {0}")]
    TileNotHeld(Tile),

    #[error("Cannot swap when bag is empty")]
    BagEmpty,

    #[error("Bag only has {available} tiles, cannot swap {requested}")]
    BagShort { available: usize, requested: usize },

    #[error(transparent)]
    Invalid(#[from] Rejection),

    #[error("Hand invariant violated: {0}")]
    Hand(#[from] HandError),
}

/// Main error type for the library's outer operations (simulation, config, harness)
#[derive(Debug, thiserror::Error)]
pub enum QwirkleError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, QwirkleError>;
