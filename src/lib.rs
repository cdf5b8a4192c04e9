//! Crate root module declarations for the chess rules engine.
//!
//! Exposes the board and game state, pseudo-legal move patterns, the legality
//! filter with its move applier and perft harness, and the FEN/SAN/PGN and
//! coordinate-move codecs. [`game_state::chess_game::ChessGame`] is the entry
//! point for playing a game.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_game;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_config;
    pub mod game_state;
    pub mod move_record;
    pub mod terminal;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_offsets;
    pub mod pawn_moves;
    pub mod pseudo_legal;
    pub mod slider_moves;
}

pub mod move_generation {
    pub mod attack_map;
    pub mod castling;
    pub mod en_passant;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod pins;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}
