//! Terminal-condition evaluation: checkmate, stalemate, and draws.

use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::chess_rules::MINOR_PIECE_MATERIAL;
use crate::game_state::chess_types::*;
use crate::game_state::game_config::GameConfig;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalityPass;
use crate::utils::fen_generator::repetition_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    Repetition,
}

/// Flags describing the position for the side to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub check: bool,
    pub double_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub draw: Option<DrawReason>,
    /// The repetition threshold was reached.
    pub repetition: bool,
}

impl GameStatus {
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.draw.is_some()
    }
}

/// Outcome string consumed by persistence collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    Ongoing,
}

impl GameResult {
    pub fn from_status(status: &GameStatus, side_to_move: Color) -> Self {
        if status.checkmate {
            match side_to_move {
                Color::Light => GameResult::BlackWins,
                Color::Dark => GameResult::WhiteWins,
            }
        } else if status.is_draw() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        }
    }

    pub const fn as_pgn(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Ongoing => "*",
        }
    }

    pub fn from_pgn(token: &str) -> Option<Self> {
        match token {
            "1-0" => Some(GameResult::WhiteWins),
            "0-1" => Some(GameResult::BlackWins),
            "1/2-1/2" => Some(GameResult::Draw),
            "*" => Some(GameResult::Ongoing),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_pgn())
    }
}

pub fn evaluate_terminal(
    board: &Board,
    state: &GameState,
    legality: &LegalityPass,
    config: &GameConfig,
) -> GameStatus {
    let mut status = GameStatus {
        check: legality.in_check(),
        double_check: legality.is_double_check(),
        ..GameStatus::default()
    };

    if !legality.has_legal_moves() {
        if status.check {
            status.checkmate = true;
            return status;
        }
        status.stalemate = true;
        status.draw = Some(DrawReason::Stalemate);
        return status;
    }

    if config.track_repetitions {
        let key = repetition_key(board, state);
        status.repetition = state.repetition_count(&key) >= config.repetition_threshold;
    }

    status.draw = if has_insufficient_material(board) {
        Some(DrawReason::InsufficientMaterial)
    } else if state.halfmove_clock >= config.fifty_move_limit {
        Some(DrawReason::FiftyMoveRule)
    } else if status.repetition {
        Some(DrawReason::Repetition)
    } else {
        None
    };

    status
}

/// No pawns remain and neither side holds more than a minor piece's worth of
/// non-king material.
pub fn has_insufficient_material(board: &Board) -> bool {
    let mut material = [0u32; 2];
    for (_, piece) in board.pieces() {
        match piece.kind {
            PieceKind::Pawn => return false,
            PieceKind::King => {}
            kind => material[piece.color.index()] += kind.value(),
        }
    }
    material.iter().all(|&m| m <= MINOR_PIECE_MATERIAL)
}
