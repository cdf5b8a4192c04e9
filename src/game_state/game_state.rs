//! Turn, rights, clocks, terminal flags, repetition table, and move text.
//!
//! `GameState` holds everything about a game that is not piece placement. The
//! FEN-derived part (side, rights, en passant, clocks) is restored wholesale
//! from a snapshot on unmake; the repetition table and move-text log are
//! trimmed by one entry instead.

use std::collections::HashMap;

use crate::game_state::chess_types::*;
use crate::game_state::terminal::GameStatus;
use crate::utils::fen_parser::FenFields;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,

    /// Terminal flags of the current position, refreshed after every
    /// legality pass.
    pub status: GameStatus,

    repetition_table: HashMap<String, u8>,
    position_history: Vec<String>,
    move_text: Vec<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            status: GameStatus::default(),
            repetition_table: HashMap::new(),
            position_history: Vec::new(),
            move_text: Vec::new(),
        }
    }
}

impl GameState {
    pub fn from_fields(fields: FenFields) -> Self {
        let mut state = Self::default();
        state.restore_fields(fields);
        state
    }

    pub fn fen_fields(&self) -> FenFields {
        FenFields {
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Overwrite the FEN-derived fields. History and move text are untouched.
    pub fn restore_fields(&mut self, fields: FenFields) {
        self.side_to_move = fields.side_to_move;
        self.castling_rights = fields.castling_rights;
        self.en_passant_square = fields.en_passant_square;
        self.halfmove_clock = fields.halfmove_clock;
        self.fullmove_number = fields.fullmove_number;
    }

    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights & castle_flag(color, side) != 0
    }

    /// Count one more occurrence of `key` and return the new count.
    pub fn record_position(&mut self, key: String) -> u8 {
        let count = self.repetition_table.entry(key.clone()).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;
        self.position_history.push(key);
        count
    }

    /// Undo the most recent [`GameState::record_position`].
    pub fn forget_last_position(&mut self) {
        let Some(key) = self.position_history.pop() else {
            return;
        };
        if let Some(count) = self.repetition_table.get_mut(&key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.repetition_table.remove(&key);
            }
        }
    }

    pub fn repetition_count(&self, key: &str) -> u8 {
        self.repetition_table.get(key).copied().unwrap_or(0)
    }

    /// Repetition keys in the order they were reached.
    pub fn position_history(&self) -> &[String] {
        &self.position_history
    }

    pub fn push_move_token(&mut self, token: String) {
        self.move_text.push(token);
    }

    pub fn pop_move_token(&mut self) -> Option<String> {
        self.move_text.pop()
    }

    pub fn move_tokens(&self) -> &[String] {
        &self.move_text
    }

    /// The accumulated SAN move text, e.g. `1. e4 e5 2. Nf3`.
    pub fn move_text(&self) -> String {
        self.move_text.join(" ")
    }
}
