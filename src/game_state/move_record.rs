//! Move requests, the resolved move intent, and reversible move records.

use crate::game_state::chess_types::*;

/// What a move does beyond relocating one piece. Resolved once per move and
/// consumed identically by the applier and the notation encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    Normal,
    EnPassant,
    Castle(CastleSide),
    Promotion(PieceKind),
}

/// A request to move the piece on `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    /// Engine-originated moves skip the interactive promotion prompt and
    /// promote to a queen when no piece is given.
    pub engine_originated: bool,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            engine_originated: false,
        }
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    pub fn engine(mut self) -> Self {
        self.engine_originated = true;
        self
    }
}

/// Everything needed to reverse one applied move exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// The piece as it stood on `from` (a pawn for promotions).
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Captured piece and the square it was removed from; the square differs
    /// from `to` only for en passant.
    pub captured: Option<(Piece, Square)>,
    pub intent: MoveIntent,
    /// Castling rook origin and destination.
    pub rook_move: Option<(Square, Square)>,
    /// Full FEN of the position before the move.
    pub fen_before: String,
    /// SAN of the move when notation is being recorded.
    pub san: Option<String>,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        match self.intent {
            MoveIntent::Promotion(kind) => Some(kind),
            _ => None,
        }
    }
}
