//! Perft runner.
//!
//! Usage:
//! `cargo run --release --bin perft -- --depth 5`
//! `cargo run --release --bin perft -- --fen "<fen>" --depth 3 --divide`

use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_rules::game_state::chess_game::ChessGame;
use chess_rules::game_state::chess_rules::STARTING_POSITION_FEN;
use chess_rules::move_generation::perft::{perft, perft_divide, perft_multi_threaded};
use chess_rules::utils::render_game_state::render_board;

#[derive(Debug, Parser)]
#[command(about = "Count legal-move tree leaves from a position")]
struct Args {
    /// Position to start from.
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// Print node counts per root move.
    #[arg(long)]
    divide: bool,

    /// Worker threads for the root split; 1 runs single-threaded.
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Library terminal-state events fire at every mate in the tree; keep them
    // out of the default output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,perft=info")),
        )
        .init();

    let args = Args::parse();
    let game = ChessGame::from_fen(&args.fen)?;
    println!("{}\n", render_board(game.board()));

    let start = Instant::now();
    let nodes = if args.divide {
        let divide = perft_divide(&game, args.depth)?;
        for (mv, count) in &divide {
            println!("{mv}: {count}");
        }
        divide.iter().map(|(_, count)| count).sum::<u64>()
    } else if args.threads > 1 {
        perft_multi_threaded(&game, args.depth, args.threads)?
    } else {
        perft(&game, args.depth)?
    };
    let elapsed = start.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    info!(depth = args.depth, nodes, elapsed_ms = elapsed.as_millis() as u64, nps = nps as u64, "perft complete");
    println!("\nNodes searched: {nodes}");
    Ok(())
}
