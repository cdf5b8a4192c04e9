//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type returned by game construction,
//! notation parsing, and the move API. Move rejections are always atomic: when
//! one of these is returned the board, counters, and move-text log are exactly
//! as they were before the call.
//!
//! Usage guidelines:
//! - `IllegalMove`, `PromotionPending`, `PromotionRequired`, and
//!   `InvalidPromotion` are recoverable; present them to the user and retry.
//! - `MalformedPosition` is raised at construction or load time and means the
//!   engine refused to operate on the position at all.
//! - `InvalidNotation` covers SAN, coordinate, square, and PGN text that could
//!   not be interpreted.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Square};

/// Why a move request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// There is no piece on the origin square.
    NoPieceOnOrigin,
    /// The piece on the origin square belongs to the side not on move.
    WrongTurn,
    /// Origin and destination are the same square.
    NoOp,
    /// The destination is not in the piece's current legal-move list.
    NotLegal,
    /// A promotion piece was supplied for a move that does not promote.
    PromotionNotApplicable,
}

impl std::fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IllegalMoveReason::NoPieceOnOrigin => "no piece on origin square",
            IllegalMoveReason::WrongTurn => "not this side's turn",
            IllegalMoveReason::NoOp => "origin equals destination",
            IllegalMoveReason::NotLegal => "destination is not a legal move",
            IllegalMoveReason::PromotionNotApplicable => "move does not promote",
        };
        f.write_str(text)
    }
}

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("illegal move {from}{to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: IllegalMoveReason,
    },

    /// A promotion choice for `from -> to` must be made before anything else.
    #[error("promotion pending for {from}{to}; choose a piece or cancel")]
    PromotionPending { from: Square, to: Square },

    /// The request reached the last rank without a promotion piece and the
    /// game is now waiting for one.
    #[error("move {from}{to} requires a promotion choice")]
    PromotionRequired { from: Square, to: Square },

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    #[error("malformed position: {0}")]
    MalformedPosition(String),

    #[error("invalid notation: {0}")]
    InvalidNotation(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
