//! 8×8 mailbox board: the single source of truth for piece placement.
//!
//! Any list of pieces is derived from the slots on demand. The king squares
//! are cached per color and kept in sync by [`Board::set_piece_at`].

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::utils::fen_parser::parse_placement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    king_squares: [Square; 2],
}

impl Board {
    /// Build a board from the FEN placement field (`rnbqkbnr/pppppppp/...`).
    ///
    /// Fails with `MalformedPosition` unless there are exactly 8 ranks of 8
    /// squares and exactly one king per color.
    pub fn from_fen(placement: &str) -> ChessResult<Self> {
        parse_placement(placement)
    }

    /// Assemble a board from raw slots; the caller has already verified the
    /// king squares.
    pub(crate) fn from_parts(squares: [Option<Piece>; 64], king_squares: [Square; 2]) -> Self {
        Self {
            squares,
            king_squares,
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Replace the slot's content. Placing a king updates that color's cached
    /// king square.
    #[inline]
    pub fn set_piece_at(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(Piece {
            kind: PieceKind::King,
            color,
        }) = piece
        {
            self.king_squares[color.index()] = square;
        }
        self.squares[square.index()] = piece;
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    #[inline]
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(p) if p.color == color)
    }

    /// Occupied squares and their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }
}
