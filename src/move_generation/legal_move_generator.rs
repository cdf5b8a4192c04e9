//! Legality pass: narrows every pseudo-legal destination of the side to move
//! down to the fully legal set.
//!
//! A pass is computed from scratch for one position and never mutated
//! afterwards. It bundles the opponent attack map, the checking pieces, the
//! absolute pins, and per-piece legal destinations.

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRequest;
use crate::move_generation::attack_map::AttackMap;
use crate::move_generation::castling::castling_destinations;
use crate::move_generation::en_passant::en_passant_exposes_king;
use crate::move_generation::legal_move_checks::{line_of_attack, square_behind_king};
use crate::move_generation::pins::{find_pins, pin_axis, Pin};
use crate::moves::pawn_moves::en_passant_victim_square;
use crate::moves::pseudo_legal::pseudo_legal_destinations;

/// Legal destinations of one piece of the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceMoves {
    pub square: Square,
    pub piece: Piece,
    pub destinations: Vec<Square>,
    /// Direction of the absolute pin holding this piece, if any.
    pub pin: Option<Direction>,
}

impl PieceMoves {
    /// Whether moving to `to` promotes a pawn.
    #[inline]
    pub fn promotes_on(&self, to: Square) -> bool {
        self.piece.kind == PieceKind::Pawn && to.rank() == self.piece.color.promotion_rank()
    }

    /// Distinct moves, counting a promoting destination once per promotion
    /// piece.
    pub fn move_count(&self) -> usize {
        self.destinations
            .iter()
            .map(|&to| if self.promotes_on(to) { PROMOTION_KINDS.len() } else { 1 })
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct LegalityPass {
    side: Color,
    attack_map: AttackMap,
    checkers: Vec<(Square, Piece)>,
    pins: Vec<Pin>,
    pieces: Vec<PieceMoves>,
}

impl LegalityPass {
    pub fn compute(board: &Board, state: &GameState) -> Self {
        let side = state.side_to_move;
        let attack_map = AttackMap::build(board, side.opposite());
        let king_square = board.king_square(side);
        let checkers: Vec<(Square, Piece)> = attack_map.attackers_of(king_square).collect();
        let pins = find_pins(board, side);
        let en_passant = state.en_passant_square;

        let mut pieces = Vec::with_capacity(16);
        for (from, piece) in board.pieces_of(side) {
            let mut destinations = pseudo_legal_destinations(board, from, piece, en_passant);
            let pin = pins.iter().find(|p| p.square == from).map(|p| p.direction);

            if piece.kind == PieceKind::King {
                destinations.retain(|&to| !attack_map.is_attacked(to));
                if let [(attacker_square, attacker)] = checkers.as_slice() {
                    let line = line_of_attack(*attacker_square, *attacker, king_square);
                    let behind = square_behind_king(*attacker_square, *attacker, king_square);
                    destinations.retain(|&to| {
                        to == *attacker_square || (!line.contains(&to) && Some(to) != behind)
                    });
                }
                if checkers.is_empty() {
                    destinations.extend(castling_destinations(board, state, &attack_map, side));
                }
            } else {
                match checkers.as_slice() {
                    [] => {}
                    [(attacker_square, attacker)] => {
                        let line = line_of_attack(*attacker_square, *attacker, king_square);
                        // En passant may remove a pawn giving check.
                        let ep_capture = en_passant.filter(|&target| {
                            piece.kind == PieceKind::Pawn
                                && en_passant_victim_square(target, side) == Some(*attacker_square)
                        });
                        destinations.retain(|to| line.contains(to) || ep_capture == Some(*to));
                    }
                    _ => destinations.clear(),
                }

                if let Some(direction) = pin {
                    let axis = pin_axis(from, direction);
                    destinations.retain(|to| axis.contains(to));
                }

                if piece.kind == PieceKind::Pawn {
                    if let Some(target) = en_passant {
                        if destinations.contains(&target)
                            && en_passant_exposes_king(board, from, target, side)
                        {
                            destinations.retain(|&to| to != target);
                        }
                    }
                }
            }

            pieces.push(PieceMoves {
                square: from,
                piece,
                destinations,
                pin,
            });
        }

        let pass = Self {
            side,
            attack_map,
            checkers,
            pins,
            pieces,
        };
        trace!(
            side = ?pass.side,
            moves = pass.legal_move_count(),
            checkers = pass.checkers.len(),
            pins = pass.pins.len(),
            "legality pass"
        );
        pass
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    pub fn attack_map(&self) -> &AttackMap {
        &self.attack_map
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        !self.checkers.is_empty()
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checkers.len() > 1
    }

    /// The first piece giving check.
    pub fn attacker(&self) -> Option<(Square, Piece)> {
        self.checkers.first().copied()
    }

    pub fn checkers(&self) -> &[(Square, Piece)] {
        &self.checkers
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn piece_moves(&self) -> &[PieceMoves] {
        &self.pieces
    }

    pub fn moves_for(&self, from: Square) -> Option<&PieceMoves> {
        self.pieces.iter().find(|p| p.square == from)
    }

    /// Legal destinations of the piece on `from`; empty for an empty square or
    /// a piece of the side not to move.
    pub fn moves_from(&self, from: Square) -> &[Square] {
        self.moves_for(from)
            .map(|p| p.destinations.as_slice())
            .unwrap_or(&[])
    }

    #[inline]
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.moves_from(from).contains(&to)
    }

    /// Number of distinct legal moves, promotions expanded per piece kind.
    pub fn legal_move_count(&self) -> usize {
        self.pieces.iter().map(PieceMoves::move_count).sum()
    }

    pub fn has_legal_moves(&self) -> bool {
        self.pieces.iter().any(|p| !p.destinations.is_empty())
    }

    /// Every legal move as an engine-originated request, one per promotion
    /// piece for promoting pawn moves.
    pub fn move_requests(&self) -> Vec<MoveRequest> {
        let mut requests = Vec::with_capacity(self.legal_move_count());
        for moves in &self.pieces {
            for &to in &moves.destinations {
                let request = MoveRequest::new(moves.square, to).engine();
                if moves.promotes_on(to) {
                    requests.extend(PROMOTION_KINDS.iter().map(|&kind| request.with_promotion(kind)));
                } else {
                    requests.push(request);
                }
            }
        }
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::LegalityPass;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Square;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::sq;
    use crate::utils::fen_parser::parse_fen;

    fn pass(fen: &str) -> LegalityPass {
        let (board, fields) = parse_fen(fen).expect("FEN should parse");
        LegalityPass::compute(&board, &GameState::from_fields(fields))
    }

    fn sorted(squares: &[Square]) -> Vec<Square> {
        let mut squares = squares.to_vec();
        squares.sort();
        squares
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let pass = pass(STARTING_POSITION_FEN);
        assert_eq!(pass.legal_move_count(), 20);
        assert!(!pass.in_check());
        assert_eq!(pass.move_requests().len(), 20);
    }

    #[test]
    fn king_cannot_retreat_along_checking_ray() {
        let pass = pass("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(pass.in_check());
        assert_eq!(pass.attacker().map(|(s, _)| s), Some(sq("a1")));
        let king = sorted(pass.moves_from(sq("e1")));
        assert_eq!(king, sorted(&[sq("d2"), sq("e2"), sq("f2")]));
    }

    #[test]
    fn single_check_allows_capture_or_block_only() {
        let pass = pass("4k3/8/8/8/8/8/1N5R/r3K3 w - - 0 1");
        assert_eq!(pass.moves_from(sq("b2")), &[sq("d1")]);
        assert!(pass.moves_from(sq("h2")).is_empty());
        // The rook's ray runs through the king onto f1.
        assert!(pass.attack_map().is_attacked(sq("f1")));
        assert!(!pass.moves_from(sq("e1")).contains(&sq("f1")));
    }

    #[test]
    fn double_check_leaves_only_king_moves() {
        // Rook e8 and knight d3 both check the king on e1.
        let pass = pass("4r2k/8/8/8/8/3n4/8/R3K3 w - - 0 1");
        assert!(pass.is_double_check());
        assert!(pass.moves_from(sq("a1")).is_empty());
        assert!(!pass.moves_from(sq("e1")).is_empty());
    }

    #[test]
    fn pinned_piece_moves_along_the_pin_only() {
        let pass = pass("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        assert_eq!(
            sorted(pass.moves_from(sq("e2"))),
            sorted(&[sq("e3"), sq("e4"), sq("e5"), sq("e6"), sq("e7"), sq("e8")])
        );
    }

    #[test]
    fn en_passant_that_exposes_king_is_removed() {
        let pass = pass("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1");
        assert!(!pass.is_legal(sq("b5"), sq("c6")));
        assert!(pass.is_legal(sq("b5"), sq("b6")));
    }

    #[test]
    fn en_passant_can_capture_a_checking_pawn() {
        // Dark pawn d5 just pushed and checks the king on e4.
        let pass = pass("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1");
        assert!(pass.in_check());
        assert!(pass.is_legal(sq("e5"), sq("d6")));
    }

    #[test]
    fn promotions_expand_into_four_requests() {
        let pass = pass("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(pass.moves_from(sq("a7")), &[sq("a8")]);
        assert_eq!(pass.legal_move_count(), 4 + 5);
        assert_eq!(pass.move_requests().len(), 9);
    }
}
