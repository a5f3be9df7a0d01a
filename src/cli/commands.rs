use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chessbox")]
#[command(about = "A chess rules engine with an interactive text board")]
pub struct Cli {
    /// Start from this FEN instead of the configured start position
    #[arg(long, global = true)]
    pub fen: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the computer player's move choice
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read game commands from standard input (the default)
    ///
    /// Example session:
    ///   play pc3
    ///   move e2e4
    ///   board
    ///   quit
    Play,

    /// Count leaf nodes of the legal move tree
    ///
    /// Examples:
    ///   chessbox perft 4
    ///   chessbox perft 3 --fen "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"
    Perft {
        /// Depth in plies
        depth: u32,
    },

    /// Print the board, the raw mailbox dump and the fingerprint of a position
    Show,
}
