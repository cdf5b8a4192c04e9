//! FEN-to-position parser.
//!
//! Builds a [`Board`] from the placement field and the remaining game-state
//! fields (side, castling rights, en-passant target, clocks) from the rest of
//! a Forsyth-Edwards Notation string.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::pawn_moves::en_passant_victim_square;
use crate::utils::algebraic::algebraic_to_square;

/// The five non-placement FEN fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenFields {
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

fn malformed(msg: impl Into<String>) -> ChessError {
    ChessError::MalformedPosition(msg.into())
}

/// Parse a full six-field FEN string.
pub fn parse_fen(fen: &str) -> ChessResult<(Board, FenFields)> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| malformed("missing board layout in FEN"))?;
    let board = parse_placement(board_part)?;
    let fields = parse_fen_fields(parts)?;
    if let Some(target) = fields.en_passant_square {
        check_en_passant_target(&board, target, fields.side_to_move)?;
    }

    Ok((board, fields))
}

/// The target must be empty with an enemy pawn on the square it passed over
/// onto.
fn check_en_passant_target(board: &Board, target: Square, side: Color) -> ChessResult<()> {
    if !board.is_empty(target) {
        return Err(malformed(format!("en-passant square {target} is occupied")));
    }
    let enemy_pawn = Some(Piece::new(PieceKind::Pawn, side.opposite()));
    let victim = en_passant_victim_square(target, side).and_then(|sq| board.piece_at(sq));
    if victim != enemy_pawn {
        return Err(malformed(format!(
            "no {:?} pawn behind en-passant square {target}",
            side.opposite()
        )));
    }
    Ok(())
}

/// Parse only the state fields of a full FEN, skipping the placement.
pub fn parse_fen_state(fen: &str) -> ChessResult<FenFields> {
    let mut parts = fen.split_whitespace();
    parts
        .next()
        .ok_or_else(|| malformed("missing board layout in FEN"))?;
    parse_fen_fields(parts)
}

fn parse_fen_fields<'a>(mut parts: impl Iterator<Item = &'a str>) -> ChessResult<FenFields> {
    let side_part = parts.next().ok_or_else(|| malformed("missing side-to-move in FEN"))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| malformed("missing castling rights in FEN"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| malformed("missing en-passant square in FEN"))?;
    let halfmove_part = parts
        .next()
        .ok_or_else(|| malformed("missing halfmove clock in FEN"))?;
    let fullmove_part = parts
        .next()
        .ok_or_else(|| malformed("missing fullmove number in FEN"))?;

    if parts.next().is_some() {
        return Err(malformed("FEN has extra trailing fields"));
    }

    let side_to_move = parse_side_to_move(side_part)?;
    Ok(FenFields {
        side_to_move,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_square: parse_en_passant_square(en_passant_part, side_to_move)?,
        halfmove_clock: halfmove_part
            .parse::<u32>()
            .map_err(|_| malformed(format!("invalid halfmove clock: {halfmove_part}")))?,
        fullmove_number: fullmove_part
            .parse::<u32>()
            .map_err(|_| malformed(format!("invalid fullmove number: {fullmove_part}")))?,
    })
}

/// Parse the placement field, rank 8 first, file a first.
pub fn parse_placement(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed("board layout must contain 8 ranks"));
    }

    let mut squares: [Option<Piece>; 64] = [None; 64];
    let mut kings: [Option<Square>; 2] = [None, None];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(malformed("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| malformed(format!("invalid piece character '{ch}' in board layout")))?;

            let square = Square::new(file, board_rank)
                .ok_or_else(|| malformed("board rank has too many files"))?;

            if piece.kind == PieceKind::King {
                if kings[piece.color.index()].is_some() {
                    return Err(malformed(format!("more than one {:?} king", piece.color)));
                }
                kings[piece.color.index()] = Some(square);
            }

            squares[square.index()] = Some(piece);
            file += 1;
        }

        if file != 8 {
            return Err(malformed("board rank does not sum to 8 files"));
        }
    }

    let light_king = kings[Color::Light.index()].ok_or_else(|| malformed("light king is missing"))?;
    let dark_king = kings[Color::Dark.index()].ok_or_else(|| malformed("dark king is missing"))?;

    Ok(Board::from_parts(squares, [light_king, dark_king]))
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(malformed(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(malformed(format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str, side: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| malformed(format!("invalid en-passant square: {en_passant_part}")))?;
    // Rank 6 with White to move, rank 3 with Black to move.
    let expected_rank = match side {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if square.rank() != expected_rank {
        return Err(malformed(format!(
            "en-passant square {en_passant_part} does not match side to move"
        )));
    }
    Ok(Some(square))
}
