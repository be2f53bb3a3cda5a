pub mod scoring;

pub use scoring::{line_score, score_move, score_placed, BONUS_LINE_LENGTH, BONUS_POINTS, END_GAME_BONUS};
