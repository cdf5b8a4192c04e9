//! Absolute pin detection by scanning the eight rays out of the king.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_offsets::{slides_along, ALL_DIRECTIONS};

/// A friendly piece that may only move along `direction` (either way).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    pub direction: Direction,
}

/// Pins against `color`'s king: the first piece on a ray is friendly and the
/// next one is an enemy slider moving along that ray.
pub fn find_pins(board: &Board, color: Color) -> Vec<Pin> {
    let king_square = board.king_square(color);
    let mut pins = Vec::new();

    for direction in ALL_DIRECTIONS {
        let mut candidate: Option<Square> = None;
        let mut current = king_square;

        while let Some(next) = current.step(direction) {
            current = next;
            let Some(piece) = board.piece_at(next) else {
                continue;
            };

            match candidate {
                None if piece.color == color => candidate = Some(next),
                None => break,
                Some(pinned) => {
                    if piece.color != color && slides_along(piece.kind, direction) {
                        pins.push(Pin {
                            square: pinned,
                            direction,
                        });
                    }
                    break;
                }
            }
        }
    }

    pins
}

/// Squares on the pin line through `square`, both ways to the board edge.
pub fn pin_axis(square: Square, direction: Direction) -> Vec<Square> {
    let mut axis = Vec::with_capacity(7);
    for step in [direction, (-direction.0, -direction.1)] {
        let mut current = square;
        while let Some(next) = current.step(step) {
            axis.push(next);
            current = next;
        }
    }
    axis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::sq;

    #[test]
    fn finds_orthogonal_and_diagonal_pins() {
        let board =
            Board::from_fen("4r1k1/8/8/b7/8/2N5/4B3/4K3").expect("placement should parse");
        let pins = find_pins(&board, Color::Light);
        assert!(pins.contains(&Pin {
            square: sq("e2"),
            direction: (0, 1)
        }));
        assert!(pins.contains(&Pin {
            square: sq("c3"),
            direction: (-1, 1)
        }));
        assert_eq!(pins.len(), 2);
    }

    #[test]
    fn bishop_does_not_pin_along_a_file() {
        let board = Board::from_fen("4b1k1/8/8/8/8/8/4N3/4K3").expect("placement should parse");
        assert!(find_pins(&board, Color::Light).is_empty());
    }

    #[test]
    fn two_friendly_pieces_break_the_pin() {
        let board = Board::from_fen("4r1k1/8/8/8/4P3/8/4N3/4K3").expect("placement should parse");
        assert!(find_pins(&board, Color::Light).is_empty());
    }

    #[test]
    fn pin_axis_spans_the_whole_line() {
        let axis = pin_axis(sq("e2"), (0, 1));
        assert_eq!(axis.len(), 7);
        assert!(axis.contains(&sq("e1")));
        assert!(axis.contains(&sq("e8")));
    }
}
