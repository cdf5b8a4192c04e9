use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::pawn_moves::en_passant_victim_square;

/// Whether capturing en passant from `from` onto `target` would leave the
/// mover's king in check. The capture is played on a clone so the two pawns
/// leaving one rank are both accounted for.
pub fn en_passant_exposes_king(board: &Board, from: Square, target: Square, color: Color) -> bool {
    let Some(victim) = en_passant_victim_square(target, color) else {
        return true;
    };

    let mut simulated = board.clone();
    let pawn = simulated.piece_at(from);
    simulated.set_piece_at(from, None);
    simulated.set_piece_at(victim, None);
    simulated.set_piece_at(target, pawn);

    is_king_in_check(&simulated, color)
}
