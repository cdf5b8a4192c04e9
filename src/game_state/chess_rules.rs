//! Canonical chess-rule constants.
//!
//! Starting position, draw thresholds, and the material limit used by the
//! insufficient-material rule.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture before the fifty-move draw.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of the same position that draw by repetition.
pub const REPETITION_THRESHOLD: u8 = 3;

/// Largest non-king, non-pawn material a side may hold while the position is
/// still a dead draw (one minor piece).
pub const MINOR_PIECE_MATERIAL: u32 = 3;
