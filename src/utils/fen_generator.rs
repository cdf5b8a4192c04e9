use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub fn generate_fen(board: &Board, state: &GameState) -> String {
    format!(
        "{} {} {}",
        repetition_key(board, state),
        state.halfmove_clock,
        state.fullmove_number
    )
}

/// The first four FEN fields: placement, side, castling, en passant. Two
/// positions with equal keys are the same position for repetition purposes.
pub fn repetition_key(board: &Board, state: &GameState) -> String {
    format!(
        "{} {} {} {}",
        generate_board_field(board),
        side_field(state.side_to_move),
        generate_castling_field(state.castling_rights),
        generate_en_passant_field(state.en_passant_square)
    )
}

pub fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let piece = Square::new(file, rank).and_then(|sq| board.piece_at(sq));
            if let Some(piece) = piece {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn side_field(color: Color) -> &'static str {
    match color {
        Color::Light => "w",
        Color::Dark => "b",
    }
}

pub fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if (rights & CASTLE_LIGHT_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_LIGHT_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_DARK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_DARK_QUEENSIDE) != 0 {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    match square {
        Some(square) => square.to_string(),
        None => "-".to_owned(),
    }
}
