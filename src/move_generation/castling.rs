use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::attack_map::AttackMap;

pub const CASTLE_SIDES: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

#[inline]
pub const fn king_home(color: Color) -> Square {
    Square::on_back_rank(4, color)
}

#[inline]
pub const fn rook_home(color: Color, side: CastleSide) -> Square {
    Square::on_back_rank(side.rook_file(), color)
}

/// King and rook origin/destination squares for a castle.
pub const fn castle_squares(color: Color, side: CastleSide) -> (Square, Square, Square, Square) {
    (
        king_home(color),
        Square::on_back_rank(side.king_target_file(), color),
        rook_home(color, side),
        Square::on_back_rank(side.rook_target_file(), color),
    )
}

/// Whether `color` may castle on `side` now. The caller guarantees the king
/// is not in check.
pub fn can_castle(
    board: &Board,
    state: &GameState,
    attack_map: &AttackMap,
    color: Color,
    side: CastleSide,
) -> bool {
    if !state.can_castle(color, side) {
        return false;
    }
    let (king_from, king_to, rook_from, _) = castle_squares(color, side);

    if board.piece_at(king_from) != Some(Piece::new(PieceKind::King, color))
        || board.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, color))
    {
        return false;
    }

    let rank = color.back_rank();
    let (low, high) = if rook_from.file() < king_from.file() {
        (rook_from.file() + 1, king_from.file())
    } else {
        (king_from.file() + 1, rook_from.file())
    };
    let lane_clear = (low..high)
        .filter_map(|file| Square::new(file, rank))
        .all(|sq| board.is_empty(sq));
    if !lane_clear {
        return false;
    }

    // The king passes through every square from its home to its target.
    let (low, high) = if king_to.file() < king_from.file() {
        (king_to.file(), king_from.file())
    } else {
        (king_from.file() + 1, king_to.file() + 1)
    };
    (low..high)
        .filter_map(|file| Square::new(file, rank))
        .all(|sq| !attack_map.is_attacked(sq))
}

/// Castling destinations for the king of `color`.
pub fn castling_destinations(
    board: &Board,
    state: &GameState,
    attack_map: &AttackMap,
    color: Color,
) -> Vec<Square> {
    CASTLE_SIDES
        .into_iter()
        .filter(|&side| can_castle(board, state, attack_map, color, side))
        .map(|side| castle_squares(color, side).1)
        .collect()
}
