//! Per-game tunables.

use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Occurrences of one position that declare a draw by repetition.
    pub repetition_threshold: u8,
    /// Half-moves without pawn move or capture that declare a draw.
    pub fifty_move_limit: u32,
    /// Maintain the SAN move-text log.
    pub record_notation: bool,
    /// Maintain the repetition table.
    pub track_repetitions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            repetition_threshold: REPETITION_THRESHOLD,
            fifty_move_limit: FIFTY_MOVE_HALFMOVES,
            record_notation: true,
            track_repetitions: true,
        }
    }
}

impl GameConfig {
    /// No notation and no repetition bookkeeping; used for tree walks.
    pub fn light_weight() -> Self {
        Self {
            record_notation: false,
            track_repetitions: false,
            ..Self::default()
        }
    }

    pub fn with_repetition_threshold(mut self, threshold: u8) -> Self {
        self.repetition_threshold = threshold.max(1);
        self
    }

    pub fn with_fifty_move_limit(mut self, halfmoves: u32) -> Self {
        self.fifty_move_limit = halfmoves;
        self
    }

    pub fn with_notation(mut self, record_notation: bool) -> Self {
        self.record_notation = record_notation;
        self
    }

    pub fn with_repetition_tracking(mut self, track_repetitions: bool) -> Self {
        self.track_repetitions = track_repetitions;
        self
    }
}
