//! Coordinate move text, `<from><to>[q|r|b|n]`, as produced by external
//! move-search processes.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{MoveRecord, MoveRequest};
use crate::utils::algebraic::algebraic_to_square;

/// Parse coordinate text into an engine-originated request.
pub fn parse_coordinate_move(text: &str) -> ChessResult<MoveRequest> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid coordinate move: {text}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let mut request = MoveRequest::new(from, to).engine();

    if let Some(ch) = text[4..].chars().next() {
        let kind = PieceKind::from_symbol(ch)
            .filter(|k| k.is_promotion_target())
            .ok_or_else(|| {
                ChessError::InvalidNotation(format!("invalid promotion piece in move: {text}"))
            })?;
        request = request.with_promotion(kind);
    }

    Ok(request)
}

pub fn move_to_coordinate(from: Square, to: Square, promotion: Option<PieceKind>) -> String {
    let mut out = format!("{from}{to}");
    if let Some(kind) = promotion {
        out.push(kind.symbol().to_ascii_lowercase());
    }
    out
}

#[inline]
pub fn record_to_coordinate(record: &MoveRecord) -> String {
    move_to_coordinate(record.from, record.to, record.promotion())
}

#[inline]
pub fn request_to_coordinate(request: &MoveRequest) -> String {
    move_to_coordinate(request.from, request.to, request.promotion)
}
