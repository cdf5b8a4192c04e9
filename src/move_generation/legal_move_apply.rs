//! Board and state mutation for one validated move, and its exact reversal.
//!
//! These functions assume the move has already been checked against the
//! current legality pass. They never validate.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::{MoveIntent, MoveRecord};
use crate::move_generation::castling::{castle_squares, rook_home, CASTLE_SIDES};
use crate::moves::pawn_moves::en_passant_victim_square;

/// Resolve what a move does. `promotion` is the chosen piece for a pawn
/// reaching the last rank.
pub fn classify_intent(
    piece: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
    promotion: Option<PieceKind>,
) -> MoveIntent {
    match piece.kind {
        PieceKind::King if from.file().abs_diff(to.file()) == 2 => {
            if to.file() > from.file() {
                MoveIntent::Castle(CastleSide::Kingside)
            } else {
                MoveIntent::Castle(CastleSide::Queenside)
            }
        }
        PieceKind::Pawn if to.rank() == piece.color.promotion_rank() => {
            MoveIntent::Promotion(promotion.unwrap_or(PieceKind::Queen))
        }
        PieceKind::Pawn if Some(to) == en_passant && from.file() != to.file() => {
            MoveIntent::EnPassant
        }
        _ => MoveIntent::Normal,
    }
}

/// Piece relocation for a classified move.
pub struct BoardChange {
    pub captured: Option<(Piece, Square)>,
    pub rook_move: Option<(Square, Square)>,
}

/// Relocate pieces on `board` for the move `from -> to`.
pub fn apply_to_board(board: &mut Board, piece: Piece, from: Square, to: Square, intent: MoveIntent) -> BoardChange {
    let mut captured = board.piece_at(to).map(|p| (p, to));
    let mut rook_move = None;

    match intent {
        MoveIntent::EnPassant => {
            if let Some(victim) = en_passant_victim_square(to, piece.color) {
                captured = board.piece_at(victim).map(|p| (p, victim));
                board.set_piece_at(victim, None);
            }
        }
        MoveIntent::Castle(side) => {
            let (_, _, rook_from, rook_to) = castle_squares(piece.color, side);
            let rook = board.piece_at(rook_from);
            board.set_piece_at(rook_from, None);
            board.set_piece_at(rook_to, rook);
            rook_move = Some((rook_from, rook_to));
        }
        MoveIntent::Normal | MoveIntent::Promotion(_) => {}
    }

    let placed = match intent {
        MoveIntent::Promotion(kind) => Piece::new(kind, piece.color),
        _ => piece,
    };
    board.set_piece_at(from, None);
    board.set_piece_at(to, Some(placed));

    BoardChange {
        captured,
        rook_move,
    }
}

/// Rights, en passant, clocks, and turn after `record` was applied.
pub fn update_state_after_move(state: &mut GameState, record: &MoveRecord) {
    let mover = record.piece.color;

    if record.piece.kind == PieceKind::King {
        state.castling_rights &= !castle_flags_for(mover);
    }
    // A rook leaving its corner, or anything landing on a corner, ends that
    // corner's right.
    for color in [Color::Light, Color::Dark] {
        for side in CASTLE_SIDES {
            let corner = rook_home(color, side);
            if record.from == corner || record.to == corner {
                state.castling_rights &= !castle_flag(color, side);
            }
        }
    }

    state.en_passant_square = if record.piece.kind == PieceKind::Pawn
        && record.from.rank().abs_diff(record.to.rank()) == 2
    {
        record.from.offset(0, mover.forward())
    } else {
        None
    };

    if record.piece.kind == PieceKind::Pawn || record.is_capture() {
        state.halfmove_clock = 0;
    } else {
        state.halfmove_clock = state.halfmove_clock.saturating_add(1);
    }

    if mover == Color::Dark {
        state.fullmove_number = state.fullmove_number.saturating_add(1);
    }
    state.side_to_move = mover.opposite();
}

/// Put every piece touched by `record` back where it stood.
pub fn revert_board(board: &mut Board, record: &MoveRecord) {
    board.set_piece_at(record.to, None);
    if let Some((rook_from, rook_to)) = record.rook_move {
        let rook = board.piece_at(rook_to);
        board.set_piece_at(rook_to, None);
        board.set_piece_at(rook_from, rook);
    }
    if let Some((piece, square)) = record.captured {
        board.set_piece_at(square, Some(piece));
    }
    board.set_piece_at(record.from, Some(record.piece));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::sq;
    use crate::utils::fen_generator::generate_board_field;

    fn light(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::Light)
    }

    #[test]
    fn intents_are_classified_once() {
        let king = light(PieceKind::King);
        let pawn = light(PieceKind::Pawn);
        assert_eq!(
            classify_intent(king, sq("e1"), sq("g1"), None, None),
            MoveIntent::Castle(CastleSide::Kingside)
        );
        assert_eq!(
            classify_intent(king, sq("e1"), sq("c1"), None, None),
            MoveIntent::Castle(CastleSide::Queenside)
        );
        assert_eq!(
            classify_intent(pawn, sq("e5"), sq("d6"), Some(sq("d6")), None),
            MoveIntent::EnPassant
        );
        assert_eq!(
            classify_intent(pawn, sq("a7"), sq("a8"), None, Some(PieceKind::Knight)),
            MoveIntent::Promotion(PieceKind::Knight)
        );
        assert_eq!(classify_intent(pawn, sq("e2"), sq("e4"), None, None), MoveIntent::Normal);
    }

    #[test]
    fn castling_moves_rook_and_revert_restores_it() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R").expect("placement should parse");
        let king = light(PieceKind::King);
        let intent = MoveIntent::Castle(CastleSide::Queenside);
        let change = apply_to_board(&mut board, king, sq("e1"), sq("c1"), intent);
        assert_eq!(generate_board_field(&board), "4k3/8/8/8/8/8/8/2KR3R");
        assert_eq!(change.rook_move, Some((sq("a1"), sq("d1"))));

        let record = MoveRecord {
            piece: king,
            from: sq("e1"),
            to: sq("c1"),
            captured: change.captured,
            intent,
            rook_move: change.rook_move,
            fen_before: String::new(),
            san: None,
        };
        revert_board(&mut board, &record);
        assert_eq!(generate_board_field(&board), "4k3/8/8/8/8/8/8/R3K2R");
        assert_eq!(board.king_square(Color::Light), sq("e1"));
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3").expect("placement should parse");
        let change = apply_to_board(&mut board, light(PieceKind::Pawn), sq("e5"), sq("d6"), MoveIntent::EnPassant);
        assert_eq!(change.captured, Some((Piece::new(PieceKind::Pawn, Color::Dark), sq("d5"))));
        assert_eq!(generate_board_field(&board), "4k3/8/3P4/8/8/8/8/4K3");
    }

    #[test]
    fn rook_capture_on_corner_clears_that_right() {
        let mut state = GameState::default();
        state.castling_rights = CASTLE_ALL;
        let record = MoveRecord {
            piece: light(PieceKind::Bishop),
            from: sq("b7"),
            to: sq("a8"),
            captured: Some((Piece::new(PieceKind::Rook, Color::Dark), sq("a8"))),
            intent: MoveIntent::Normal,
            rook_move: None,
            fen_before: String::new(),
            san: None,
        };
        update_state_after_move(&mut state, &record);
        assert_eq!(state.castling_rights, CASTLE_ALL & !CASTLE_DARK_QUEENSIDE);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.side_to_move, Color::Dark);
        assert_eq!(state.fullmove_number, 1);
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut state = GameState::default();
        state.side_to_move = Color::Dark;
        state.halfmove_clock = 7;
        let record = MoveRecord {
            piece: Piece::new(PieceKind::Pawn, Color::Dark),
            from: sq("d7"),
            to: sq("d5"),
            captured: None,
            intent: MoveIntent::Normal,
            rook_move: None,
            fen_before: String::new(),
            san: None,
        };
        update_state_after_move(&mut state, &record);
        assert_eq!(state.en_passant_square, Some(sq("d6")));
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 2);
    }
}
