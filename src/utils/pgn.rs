//! PGN read/write for game history interchange.
//!
//! Writing uses the game's accumulated SAN move text. Reading replays each
//! SAN token through the move API, so an imported game carries the same
//! history, repetition table, and terminal flags as one played live.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_game::ChessGame;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::terminal::GameResult;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    /// SAN tokens in play order, annotations removed.
    pub moves: Vec<String>,
    pub result: GameResult,
    /// The game after replaying every move.
    pub game: ChessGame,
}

/// Seven Tag Roster headers for `game`, dated today.
pub fn default_headers(game: &ChessGame) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Casual Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), game.result().as_pgn().to_owned());

    if game.initial_fen() != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), game.initial_fen().to_owned());
    }
    headers
}

pub fn write_pgn(game: &ChessGame) -> String {
    write_pgn_with_headers(game, &default_headers(game))
}

pub fn write_pgn_with_headers(game: &ChessGame, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let result = headers
        .get("Result")
        .and_then(|x| GameResult::from_pgn(x))
        .unwrap_or_else(|| game.result());

    let move_text = game.move_text();
    if !move_text.is_empty() {
        out.push_str(&move_text);
        out.push(' ');
    }
    out.push_str(result.as_pgn());
    out.push('\n');

    out
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let mut game = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ChessError::InvalidNotation("PGN SetUp=1 is present but FEN header is missing".to_owned())
        })?;
        ChessGame::from_fen(fen)?
    } else {
        ChessGame::new()
    };

    let mut moves = Vec::<String>::new();
    let mut result = GameResult::Ongoing;

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join("\n"));
    for token in movetext.split_whitespace() {
        if let Some(parsed) = GameResult::from_pgn(token) {
            result = parsed;
            break;
        }
        let san = trim_annotation_suffix(strip_move_number(token));
        if san.is_empty() || san.starts_with('$') {
            continue;
        }

        game.apply_san(san).map_err(|err| {
            ChessError::InvalidNotation(format!("PGN move {} ({san}): {err}", moves.len() + 1))
        })?;
        moves.push(san.to_owned());
    }

    if let Some(header_result) = headers.get("Result").and_then(|x| GameResult::from_pgn(x)) {
        result = header_result;
    }

    Ok(PgnGame {
        headers,
        moves,
        result,
        game,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidNotation(format!("invalid PGN header line: {line}"));
    let inner = line
        .strip_prefix('[')
        .and_then(|x| x.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value_raw = value_raw.trim();

    if value_raw.len() < 2 || !value_raw.starts_with('"') || !value_raw.ends_with('"') {
        return Err(invalid());
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.trim().to_owned(), value))
}

/// Drop `{}` comments, `()` variations, and `;` rest-of-line comments.
fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut line_comment = false;

    for ch in text.chars() {
        match ch {
            '\n' if line_comment => {
                line_comment = false;
                out.push(' ');
            }
            _ if line_comment => {}
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' if brace_depth == 0 => paren_depth = paren_depth.saturating_add(1),
            ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            ';' if brace_depth == 0 => line_comment = true,
            '\n' => out.push(' '),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.`, `12...`, and `12.Nf3` all lose their move-number prefix.
fn strip_move_number(token: &str) -> &str {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() != token.len() && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(['+', '#', '!', '?'])
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
