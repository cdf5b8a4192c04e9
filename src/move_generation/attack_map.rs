//! Opponent attack map, rebuilt from scratch on every legality pass.
//!
//! The defending king is lifted off the board while the map is built, so a
//! slider's ray continues through the king's square. Squares occupied by the
//! attacker's own pieces are included: the king may not capture a defended
//! piece.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::pawn_moves::pawn_capture_squares;
use crate::moves::pseudo_legal::raw_destinations;

#[derive(Debug, Clone)]
pub struct AttackMap {
    attacked: [bool; 64],
    by_piece: Vec<(Square, Piece, Vec<Square>)>,
}

impl AttackMap {
    /// Squares reachable by `attacker`'s pieces.
    pub fn build(board: &Board, attacker: Color) -> Self {
        let mut see_through = board.clone();
        see_through.set_piece_at(board.king_square(attacker.opposite()), None);

        let mut attacked = [false; 64];
        let mut by_piece = Vec::with_capacity(16);

        for (from, piece) in board.pieces_of(attacker) {
            let reach: Vec<Square> = match piece.kind {
                PieceKind::Pawn => pawn_capture_squares(from, piece.color).collect(),
                _ => raw_destinations(&see_through, from, piece, None),
            };
            for square in &reach {
                attacked[square.index()] = true;
            }
            by_piece.push((from, piece, reach));
        }

        Self { attacked, by_piece }
    }

    #[inline]
    pub fn is_attacked(&self, square: Square) -> bool {
        self.attacked[square.index()]
    }

    /// Attacking pieces whose reach includes `square`.
    pub fn attackers_of(&self, square: Square) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.by_piece
            .iter()
            .filter(move |(_, _, reach)| reach.contains(&square))
            .map(|(from, piece, _)| (*from, *piece))
    }

    /// Reach of the attacking piece standing on `from`.
    pub fn reach_of(&self, from: Square) -> Option<&[Square]> {
        self.by_piece
            .iter()
            .find(|(sq, _, _)| *sq == from)
            .map(|(_, _, reach)| reach.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::AttackMap;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Color;
    use crate::utils::algebraic::sq;

    #[test]
    fn rook_ray_passes_through_defending_king() {
        let board = Board::from_fen("4k3/8/8/8/r3K3/8/8/8").expect("placement should parse");
        let map = AttackMap::build(&board, Color::Dark);
        assert!(map.is_attacked(sq("e4")));
        assert!(map.is_attacked(sq("f4")));
        assert_eq!(map.attackers_of(sq("e4")).count(), 1);
    }

    #[test]
    fn pawns_attack_diagonals_only_and_defend_friends() {
        let board = Board::from_fen("4k3/8/8/3p4/2n5/8/8/4K3").expect("placement should parse");
        let map = AttackMap::build(&board, Color::Dark);
        assert!(map.is_attacked(sq("c4")));
        assert!(map.is_attacked(sq("e4")));
        assert!(!map.is_attacked(sq("d4")));
        assert_eq!(map.reach_of(sq("d5")).map(<[_]>::len), Some(2));
    }
}
