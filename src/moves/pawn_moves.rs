use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Pushes, diagonal captures onto enemy pieces, and the en-passant capture
/// onto `en_passant` when this pawn stands beside the pawn that just pushed.
pub fn pawn_destinations(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Option<Square>,
    out: &mut Vec<Square>,
) {
    let forward = color.forward();

    if let Some(one_step) = from.offset(0, forward) {
        if board.is_empty(one_step) {
            out.push(one_step);

            if from.rank() == color.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, forward) {
                    if board.is_empty(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for to in pawn_capture_squares(from, color) {
        if board.is_color(to, color.opposite()) {
            out.push(to);
        } else if en_passant == Some(to)
            && from.rank() == en_passant_origin_rank(color)
            && en_passant_victim_square(to, color).and_then(|sq| board.piece_at(sq))
                == Some(Piece::new(PieceKind::Pawn, color.opposite()))
        {
            out.push(to);
        }
    }
}

/// The (at most two) diagonal squares a pawn attacks.
pub fn pawn_capture_squares(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let forward = color.forward();
    [-1i8, 1i8]
        .into_iter()
        .filter_map(move |file_delta| from.offset(file_delta, forward))
}

/// Rank a pawn must stand on to capture en passant.
#[inline]
pub const fn en_passant_origin_rank(color: Color) -> u8 {
    match color {
        Color::Light => 4,
        Color::Dark => 3,
    }
}

/// Square of the pawn removed by an en-passant capture landing on `target`.
#[inline]
pub fn en_passant_victim_square(target: Square, mover: Color) -> Option<Square> {
    target.offset(0, -mover.forward())
}

#[cfg(test)]
mod tests {
    use super::pawn_destinations;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Color;
    use crate::utils::algebraic::sq;

    #[test]
    fn start_rank_pawn_pushes_once_or_twice() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").expect("placement should parse");
        let mut out = Vec::new();
        pawn_destinations(&board, sq("e2"), Color::Light, None, &mut out);
        assert_eq!(out, vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn blocked_pawn_has_no_double_push() {
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3").expect("placement should parse");
        let mut out = Vec::new();
        pawn_destinations(&board, sq("e2"), Color::Light, None, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn captures_only_enemy_pieces_and_en_passant_target() {
        let board = Board::from_fen("4k3/8/8/3pPp2/8/8/8/4K3").expect("placement should parse");
        let mut out = Vec::new();
        pawn_destinations(&board, sq("e5"), Color::Light, Some(sq("d6")), &mut out);
        assert!(out.contains(&sq("e6")));
        assert!(out.contains(&sq("d6")));
        assert!(!out.contains(&sq("f6")));

        let board = Board::from_fen("4k3/8/8/8/3p4/2PQn3/8/4K3").expect("placement should parse");
        out.clear();
        pawn_destinations(&board, sq("d4"), Color::Dark, None, &mut out);
        assert_eq!(out, vec![sq("c3")]);
    }

    #[test]
    fn en_passant_needs_enemy_pawn_behind_target() {
        let board = Board::from_fen("4k3/8/8/3PK3/8/8/8/8").expect("placement should parse");
        let mut out = Vec::new();
        pawn_destinations(&board, sq("d5"), Color::Light, Some(sq("e6")), &mut out);
        assert_eq!(out, vec![sq("d6")]);

        let board = Board::from_fen("4k3/8/8/3PN3/8/8/8/4K3").expect("placement should parse");
        out.clear();
        pawn_destinations(&board, sq("d5"), Color::Light, Some(sq("e6")), &mut out);
        assert_eq!(out, vec![sq("d6")]);
    }
}
