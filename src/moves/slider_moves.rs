use crate::game_state::board::Board;
use crate::game_state::chess_types::{Direction, Square};

/// Walk each ray until the edge or the first occupied square, which is
/// included as a capture candidate.
pub fn slider_destinations(board: &Board, from: Square, directions: &[Direction], out: &mut Vec<Square>) {
    for &direction in directions {
        let mut current = from;
        while let Some(next) = current.step(direction) {
            out.push(next);
            if !board.is_empty(next) {
                break;
            }
            current = next;
        }
    }
}
