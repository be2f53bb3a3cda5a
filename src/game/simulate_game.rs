use crate::error::GameError;
use crate::game::game_state::GameState;
use crate::game::get_legal_moves::{get_legal_moves_with_limits, MoveGenLimits};
use crate::strategy::policy::Policy;

/// What happened during a playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutSummary {
    /// Actions taken (moves and swaps).
    pub actions: u32,
    pub max_turn_score: u32,
    pub max_turn_player: Option<usize>,
    /// Winner on the final scores, whether or not the game finished.
    pub winner: Option<usize>,
    /// False when the turn ceiling was hit or the game had to be forced.
    pub completed: bool,
}

/// Plays `state` forward, each player using its own policy, for at most
/// `max_turns` actions.
///
/// A player without a generated move swaps its first tile when the bag
/// allows it; otherwise the game is force-ended.
pub fn play_out(
    state: &mut GameState,
    policies: &mut [Policy; 2],
    max_turns: u32,
    limits: &MoveGenLimits,
) -> Result<PlayoutSummary, GameError> {
    let mut actions = 0;
    let mut max_turn_score = 0;
    let mut max_turn_player = None;
    let mut forced = false;

    while !state.is_over() && actions < max_turns {
        actions += 1;
        let player = state.current_player();
        let moves = get_legal_moves_with_limits(
            state.board(),
            state.current_hand(),
            state.is_first_move(),
            limits,
        );

        if let Some(chosen) = policies[player].select(state, Some(&moves)) {
            let points = state.apply_move(&chosen.placements)?;
            if points > max_turn_score {
                max_turn_score = points;
                max_turn_player = Some(player);
            }
        } else if state.can_swap() {
            let first = state.current_hand().tiles()[0];
            state.apply_swap(&[first])?;
        } else {
            state.force_end();
            forced = true;
        }
    }

    let winner = if state.is_over() {
        state.winner()
    } else {
        state.leader()
    };

    Ok(PlayoutSummary {
        actions,
        max_turn_score,
        max_turn_player,
        winner,
        completed: state.is_over() && !forced,
    })
}
