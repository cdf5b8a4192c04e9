//! Perft: exhaustive legal-move tree enumeration to a fixed depth.
//!
//! Walks play each move on the game, recurse, and unmake it. Plain node
//! counts use bulk counting at the last ply. Every walk runs on a clone built
//! with [`GameConfig::light_weight`], so the caller's game is never touched.

use std::thread;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_game::ChessGame;
use crate::game_state::game_config::GameConfig;
use crate::game_state::move_record::{MoveIntent, MoveRecord};
use crate::utils::long_algebraic::request_to_coordinate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn leaf(record: &MoveRecord, game: &ChessGame) -> Self {
        let flag = |b: bool| u64::from(b);
        PerftCounts {
            nodes: 1,
            captures: flag(record.is_capture()),
            en_passant: flag(record.intent == MoveIntent::EnPassant),
            castles: flag(matches!(record.intent, MoveIntent::Castle(_))),
            promotions: flag(record.promotion().is_some()),
            checks: flag(game.is_check()),
            checkmates: flag(game.is_checkmate()),
        }
    }
}

/// A light-weight clone of `game` to walk the tree on.
fn walker(game: &ChessGame) -> ChessResult<ChessGame> {
    ChessGame::with_config(&game.fen(), GameConfig::light_weight())
}

/// Leaf count of the legal-move tree below `game` at `depth`.
pub fn perft(game: &ChessGame, depth: u8) -> ChessResult<u64> {
    let mut walk = walker(game)?;
    perft_nodes(&mut walk, depth)
}

fn perft_nodes(game: &mut ChessGame, depth: u8) -> ChessResult<u64> {
    match depth {
        0 => return Ok(1),
        1 => return Ok(game.legal_move_count() as u64),
        _ => {}
    }

    let mut nodes = 0;
    for request in game.legality().move_requests() {
        let record = game.make_move(request)?;
        nodes += perft_nodes(game, depth - 1)?;
        game.unmake_move(&record)?;
    }
    Ok(nodes)
}

/// Leaf statistics at `depth`: every leaf move is played so its kind and
/// the resulting check state can be counted.
pub fn perft_detailed(game: &ChessGame, depth: u8) -> ChessResult<PerftCounts> {
    let mut walk = walker(game)?;
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }
    let mut total = PerftCounts::default();
    perft_detailed_recurse(&mut walk, depth, &mut total)?;
    Ok(total)
}

fn perft_detailed_recurse(game: &mut ChessGame, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    for request in game.legality().move_requests() {
        let record = game.make_move(request)?;
        if depth == 1 {
            counts.merge(PerftCounts::leaf(&record, game));
        } else {
            perft_detailed_recurse(game, depth - 1, counts)?;
        }
        game.unmake_move(&record)?;
    }
    Ok(())
}

/// Node counts per root move, keyed by coordinate text, in generation order.
pub fn perft_divide(game: &ChessGame, depth: u8) -> ChessResult<Vec<(String, u64)>> {
    let mut walk = walker(game)?;
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for request in walk.legality().move_requests() {
        let record = walk.make_move(request)?;
        let nodes = perft_nodes(&mut walk, depth - 1)?;
        walk.unmake_move(&record)?;
        out.push((request_to_coordinate(&request), nodes));
    }
    Ok(out)
}

/// [`perft`] with root moves split across up to `threads` scoped workers,
/// each walking an independent clone.
pub fn perft_multi_threaded(game: &ChessGame, depth: u8, threads: usize) -> ChessResult<u64> {
    if depth <= 1 {
        return perft(game, depth);
    }

    let root = walker(game)?;
    let requests = root.legality().move_requests();
    let chunk_size = requests.len().div_ceil(threads.max(1)).max(1);

    thread::scope(|scope| {
        let handles: Vec<_> = requests
            .chunks(chunk_size)
            .map(|chunk| {
                let mut walk = root.clone();
                scope.spawn(move || -> ChessResult<u64> {
                    let mut nodes = 0;
                    for &request in chunk {
                        let record = walk.make_move(request)?;
                        nodes += perft_nodes(&mut walk, depth - 1)?;
                        walk.unmake_move(&record)?;
                    }
                    Ok(nodes)
                })
            })
            .collect();

        let mut total = 0;
        for handle in handles {
            let nodes = handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))?;
            total += nodes;
        }
        Ok(total)
    })
}
