//! Pseudo-legal destinations per piece, ignoring king safety.
//!
//! Generation dispatches on [`PieceKind`] and then runs one uniform pass that
//! drops destinations occupied by the mover's own pieces. Off-board targets
//! never appear because [`Square::offset`] refuses them.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::king_moves::king_destinations;
use crate::moves::knight_moves::knight_destinations;
use crate::moves::move_offsets::slider_directions;
use crate::moves::pawn_moves::pawn_destinations;
use crate::moves::slider_moves::slider_destinations;

/// Raw reach of `piece` on `from`, including squares held by its own side.
pub fn raw_destinations(
    board: &Board,
    from: Square,
    piece: Piece,
    en_passant: Option<Square>,
) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, from, piece.color, en_passant, &mut out),
        PieceKind::Knight => knight_destinations(from, &mut out),
        PieceKind::King => king_destinations(from, &mut out),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_destinations(board, from, slider_directions(piece.kind), &mut out)
        }
    }
    out
}

/// Drop destinations occupied by `color`'s own pieces.
pub fn filter_own_occupied(board: &Board, color: Color, destinations: &mut Vec<Square>) {
    destinations.retain(|&to| !board.is_color(to, color));
}

pub fn pseudo_legal_destinations(
    board: &Board,
    from: Square,
    piece: Piece,
    en_passant: Option<Square>,
) -> Vec<Square> {
    let mut out = raw_destinations(board, from, piece, en_passant);
    filter_own_occupied(board, piece.color, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::pseudo_legal_destinations;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_has_twenty_pseudo_legal_moves() {
        let (board, _) = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        let total: usize = board
            .pieces_of(Color::Light)
            .map(|(sq, piece)| pseudo_legal_destinations(&board, sq, piece, None).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn own_pieces_are_never_destinations() {
        let board: Board = parse_fen(STARTING_POSITION_FEN)
            .expect("starting FEN should parse")
            .0;
        for (sq, piece) in board.pieces() {
            for to in pseudo_legal_destinations(&board, sq, piece, None) {
                assert!(!board.is_color(to, piece.color), "{sq} -> {to}");
            }
        }
    }
}
