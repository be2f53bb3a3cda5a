use crate::game::board::{Board, Placement, Position};
use crate::rules::lines::affected_lines;

/// Length of a line that earns the bonus.
pub const BONUS_LINE_LENGTH: usize = 6;

/// Extra points for completing a line of [`BONUS_LINE_LENGTH`].
pub const BONUS_POINTS: u32 = 6;

/// Awarded to the player who empties their hand once the bag is empty.
pub const END_GAME_BONUS: u32 = 6;

/// Points for one line: its length, plus the bonus when complete.
/// Lines shorter than two tiles do not score.
pub fn line_score(line_length: usize) -> u32 {
    if line_length < 2 {
        return 0;
    }
    let mut score = line_length as u32;
    if line_length == BONUS_LINE_LENGTH {
        score += BONUS_POINTS;
    }
    score
}

/// Scores placements that are already on `board_after`.
/// Returns `(points, bonus_line_count)`.
pub fn score_placed(board_after: &Board, placements: &[Placement]) -> (u32, u32) {
    if placements.is_empty() {
        return (0, 0);
    }

    let positions: Vec<Position> = placements.iter().map(|&(pos, _)| pos).collect();
    let lines = affected_lines(board_after, &positions);

    let mut points = 0;
    let mut bonus_lines = 0;
    for line in &lines {
        points += line_score(line.len());
        if line.len() == BONUS_LINE_LENGTH {
            bonus_lines += 1;
        }
    }

    // A lone tile that touches nothing still counts for one.
    if lines.is_empty() && placements.len() == 1 {
        points = 1;
    }

    (points, bonus_lines)
}

/// Scores `placements` against the board as it was before the move.
/// Assumes the placements already passed validation.
pub fn score_move(board_before: &Board, placements: &[Placement]) -> (u32, u32) {
    if placements.is_empty() {
        return (0, 0);
    }
    score_placed(&board_before.overlay(placements), placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::{Color, Shape, Tile};

    fn t(shape: Shape, color: Color) -> Tile {
        Tile::new(shape, color)
    }

    fn board_with(placements: &[Placement]) -> Board {
        let mut board = Board::new();
        for &(pos, tile) in placements {
            board.place(pos, tile).unwrap();
        }
        board
    }

    #[test]
    fn test_line_score() {
        assert_eq!(line_score(0), 0);
        assert_eq!(line_score(1), 0);
        assert_eq!(line_score(2), 2);
        assert_eq!(line_score(5), 5);
        assert_eq!(line_score(6), 12, "A full line scores 6 + 6 bonus");
    }

    #[test]
    fn test_single_tile_on_empty_board_scores_one() {
        let (points, bonus) = score_move(&Board::new(), &[((0, 0), t(Shape::Circle, Color::Red))]);
        assert_eq!((points, bonus), (1, 0));
    }

    #[test]
    fn test_two_tiles_same_color_score_two() {
        let placements = [
            ((0, 0), t(Shape::Circle, Color::Red)),
            ((0, 1), t(Shape::Square, Color::Red)),
        ];
        assert_eq!(score_move(&Board::new(), &placements), (2, 0));
    }

    #[test]
    fn test_full_line_scores_twelve_with_bonus() {
        let placements: Vec<Placement> = Color::ALL
            .iter()
            .enumerate()
            .map(|(i, &c)| ((i as i32, 0), t(Shape::Circle, c)))
            .collect();
        assert_eq!(score_move(&Board::new(), &placements), (12, 1));
    }

    #[test]
    fn test_extend_row_and_start_column_scores_five() {
        // Row (0,0)-(0,1) grows to three; (1,2) below makes a fresh column of two.
        let board = board_with(&[
            ((0, 0), t(Shape::Circle, Color::Red)),
            ((0, 1), t(Shape::Square, Color::Red)),
            ((1, 2), t(Shape::Star, Color::Blue)),
        ]);
        let placements = [((0, 2), t(Shape::Star, Color::Red))];
        assert_eq!(score_move(&board, &placements), (5, 0));
    }

    #[test]
    fn test_extend_two_lines_scores_both() {
        let board = board_with(&[
            ((0, 0), t(Shape::Circle, Color::Red)),
            ((0, 1), t(Shape::Square, Color::Red)),
            ((1, 2), t(Shape::Diamond, Color::Red)),
            ((2, 2), t(Shape::Star, Color::Red)),
        ]);
        let placements = [((0, 2), t(Shape::Clover, Color::Red))];
        assert_eq!(score_move(&board, &placements), (6, 0));
    }

    #[test]
    fn test_multi_tile_move_scores_main_and_cross_lines() {
        // Column of two circles under an existing red row of two.
        let board = board_with(&[
            ((0, 0), t(Shape::Circle, Color::Red)),
            ((0, 1), t(Shape::Square, Color::Red)),
            ((1, 1), t(Shape::Square, Color::Blue)),
        ]);
        let placements = [
            ((1, 0), t(Shape::Circle, Color::Blue)),
            ((2, 0), t(Shape::Circle, Color::Green)),
        ];
        // Column 0 has three tiles; row 1 now has (1,0)-(1,1): two tiles.
        assert_eq!(score_move(&board, &placements), (5, 0));
    }

    #[test]
    fn test_empty_placements_score_nothing() {
        assert_eq!(score_move(&Board::new(), &[]), (0, 0));
    }

    #[test]
    fn test_score_move_leaves_board_unchanged() {
        let board = board_with(&[((0, 0), t(Shape::Circle, Color::Red))]);
        score_move(&board, &[((0, 1), t(Shape::Square, Color::Red))]);
        assert_eq!(board.get((0, 1)), None);
        assert_eq!(board.tile_count(), 1);
    }
}
