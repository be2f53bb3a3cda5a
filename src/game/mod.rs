pub mod bag;
pub mod board;
pub mod create_bag;
pub mod game_state;
pub mod get_legal_moves;
pub mod hand;
pub mod simulate_game; // Playout driver shared by the runner and the estimator
pub mod tile;
