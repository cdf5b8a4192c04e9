use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_offsets::{is_slider, slides_along, ALL_DIRECTIONS, KNIGHT_OFFSETS};
use crate::moves::pawn_moves::pawn_capture_squares;

/// Whether any `attacker_color` piece reaches `square` on this board.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let is_enemy = |sq: Square, kind: PieceKind| {
        board.piece_at(sq) == Some(Piece::new(kind, attacker_color))
    };

    // A pawn of the attacker attacks `square` when `square` would attack it
    // back as a pawn of the defending color.
    if pawn_capture_squares(square, attacker_color.opposite()).any(|sq| is_enemy(sq, PieceKind::Pawn)) {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .filter_map(|&offset| square.step(offset))
        .any(|sq| is_enemy(sq, PieceKind::Knight))
    {
        return true;
    }

    for direction in ALL_DIRECTIONS {
        let mut current = square;
        let mut distance = 0;
        while let Some(next) = current.step(direction) {
            distance += 1;
            if let Some(piece) = board.piece_at(next) {
                if piece.color == attacker_color
                    && (slides_along(piece.kind, direction)
                        || (distance == 1 && piece.kind == PieceKind::King))
                {
                    return true;
                }
                break;
            }
            current = next;
        }
    }

    false
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_square(color), color.opposite())
}

/// Unit step from `from` toward `to` when they share a rank, file, or
/// diagonal.
pub fn direction_between(from: Square, to: Square) -> Option<Direction> {
    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;
    if (df == 0 && dr == 0) || (df != 0 && dr != 0 && df.abs() != dr.abs()) {
        return None;
    }
    Some((df.signum(), dr.signum()))
}

/// Squares that resolve a single check by capture or interposition: the
/// attacker's square, then for a slider every square strictly between it and
/// the king.
pub fn line_of_attack(attacker_square: Square, attacker: Piece, king_square: Square) -> Vec<Square> {
    let mut line = vec![attacker_square];
    if !is_slider(attacker.kind) {
        return line;
    }
    let Some(direction) = direction_between(attacker_square, king_square) else {
        return line;
    };

    let mut current = attacker_square;
    while let Some(next) = current.step(direction) {
        if next == king_square {
            break;
        }
        line.push(next);
        current = next;
    }
    line
}

/// The square directly behind the king on a slider's checking ray.
pub fn square_behind_king(attacker_square: Square, attacker: Piece, king_square: Square) -> Option<Square> {
    if !is_slider(attacker.kind) {
        return None;
    }
    direction_between(attacker_square, king_square).and_then(|d| king_square.step(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::sq;

    #[test]
    fn detects_each_attacker_kind() {
        let cases = [
            ("4k3/8/8/8/8/8/3p4/4K3", true),  // pawn
            ("4k3/8/8/8/8/5n2/8/4K3", true),  // knight
            ("4k3/8/8/b7/8/8/8/4K3", true),   // bishop
            ("4k3/8/8/8/8/8/8/r3K3", true),   // rook
            ("4k3/4q3/8/8/8/8/8/4K3", true),  // queen
            ("4k3/4q3/8/8/8/8/4P3/4K3", false), // blocked queen
            ("4k3/8/8/8/8/8/4p3/4K3", false), // pawn straight ahead
        ];
        for (placement, expected) in cases {
            let board = Board::from_fen(placement).expect("placement should parse");
            assert_eq!(is_king_in_check(&board, Color::Light), expected, "{placement}");
        }
    }

    #[test]
    fn line_of_attack_runs_from_attacker_to_king() {
        let rook = Piece::new(PieceKind::Rook, Color::Dark);
        let line = line_of_attack(sq("a1"), rook, sq("e1"));
        assert_eq!(line, vec![sq("a1"), sq("b1"), sq("c1"), sq("d1")]);
        assert_eq!(square_behind_king(sq("a1"), rook, sq("e1")), Some(sq("f1")));

        let knight = Piece::new(PieceKind::Knight, Color::Dark);
        assert_eq!(line_of_attack(sq("f3"), knight, sq("e1")), vec![sq("f3")]);
        assert_eq!(square_behind_king(sq("f3"), knight, sq("e1")), None);
    }
}
