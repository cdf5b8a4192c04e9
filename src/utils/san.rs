//! Standard Algebraic Notation encode and decode.
//!
//! Encoding is split in two: the body (piece, disambiguation, capture,
//! destination, promotion) is computed against the position before the move,
//! the `+`/`#` suffix against the legality pass after it.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{MoveIntent, MoveRequest};
use crate::game_state::terminal::GameStatus;
use crate::move_generation::castling::castle_squares;
use crate::move_generation::legal_move_generator::LegalityPass;
use crate::utils::algebraic::algebraic_to_square;

/// SAN text of a move without its check suffix.
pub fn san_body(
    board: &Board,
    legality: &LegalityPass,
    piece: Piece,
    from: Square,
    to: Square,
    intent: MoveIntent,
) -> String {
    match intent {
        MoveIntent::Castle(CastleSide::Kingside) => return "O-O".to_owned(),
        MoveIntent::Castle(CastleSide::Queenside) => return "O-O-O".to_owned(),
        _ => {}
    }

    let is_capture = board.piece_at(to).is_some() || intent == MoveIntent::EnPassant;
    let mut out = String::with_capacity(8);

    if piece.kind == PieceKind::Pawn {
        if is_capture {
            out.push(from.file_char());
            out.push('x');
        }
    } else {
        out.push(piece.kind.symbol());
        out.push_str(&disambiguation(legality, piece, from, to));
        if is_capture {
            out.push('x');
        }
    }

    out.push_str(&to.to_string());
    if let MoveIntent::Promotion(kind) = intent {
        out.push('=');
        out.push(kind.symbol());
    }
    out
}

/// Origin file if it tells the candidates apart, else the origin rank, else
/// both.
pub fn disambiguation(legality: &LegalityPass, piece: Piece, from: Square, to: Square) -> String {
    let rivals: Vec<Square> = legality
        .piece_moves()
        .iter()
        .filter(|m| m.piece == piece && m.square != from && m.destinations.contains(&to))
        .map(|m| m.square)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != from.file()) {
        from.file_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != from.rank()) {
        from.rank_char().to_string()
    } else {
        from.to_string()
    }
}

#[inline]
pub fn check_suffix(status: &GameStatus) -> &'static str {
    if status.checkmate {
        "#"
    } else if status.check {
        "+"
    } else {
        ""
    }
}

/// Resolve a SAN token against the current legal moves.
pub fn parse_san(board: &Board, legality: &LegalityPass, token: &str) -> ChessResult<MoveRequest> {
    let invalid = || ChessError::InvalidNotation(format!("unrecognised SAN move: {token}"));
    let text = token.trim_end_matches(['+', '#', '!', '?']);
    let color = legality.side();

    let castle = match text {
        "O-O" | "0-0" => Some(CastleSide::Kingside),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queenside),
        _ => None,
    };
    if let Some(side) = castle {
        let (king_from, king_to, _, _) = castle_squares(color, side);
        if board.king_square(color) != king_from || !legality.is_legal(king_from, king_to) {
            return Err(invalid());
        }
        return Ok(MoveRequest::new(king_from, king_to));
    }

    let (text, promotion) = split_promotion(text).ok_or_else(invalid)?;
    if text.len() < 2 || !text.is_ascii() {
        return Err(invalid());
    }
    let (head, dest) = text.split_at(text.len() - 2);
    let to = algebraic_to_square(dest)?;

    let mut chars = head.chars().peekable();
    let kind = match chars.peek() {
        Some(&c) if c.is_ascii_uppercase() => {
            chars.next();
            PieceKind::from_symbol(c).ok_or_else(invalid)?
        }
        _ => PieceKind::Pawn,
    };

    let mut file_hint = None;
    let mut rank_hint = None;
    for c in chars {
        match c {
            'a'..='h' => file_hint = Some(c as u8 - b'a'),
            '1'..='8' => rank_hint = Some(c as u8 - b'1'),
            'x' | '-' | ':' => {}
            _ => return Err(invalid()),
        }
    }

    let piece = Piece::new(kind, color);
    let mut candidates = legality.piece_moves().iter().filter(|m| {
        m.piece == piece
            && m.destinations.contains(&to)
            && file_hint.map_or(true, |f| m.square.file() == f)
            && rank_hint.map_or(true, |r| m.square.rank() == r)
    });

    let found = candidates.next().ok_or_else(invalid)?;
    if candidates.next().is_some() {
        return Err(ChessError::InvalidNotation(format!("ambiguous SAN move: {token}")));
    }

    let request = MoveRequest::new(found.square, to);
    Ok(match promotion {
        Some(kind) => request.with_promotion(kind),
        None => request,
    })
}

/// Split `e8=Q` / `e8Q` into the move and its promotion piece.
fn split_promotion(text: &str) -> Option<(&str, Option<PieceKind>)> {
    let last = text.chars().last()?;
    if !last.is_ascii_uppercase() {
        return Some((text, None));
    }
    let kind = PieceKind::from_symbol(last).filter(|k| k.is_promotion_target())?;
    let body = &text[..text.len() - 1];
    Some((body.strip_suffix('=').unwrap_or(body), Some(kind)))
}
