pub mod chess;
pub mod cli;
pub mod game;

// Re-export key types for easy testing
pub use chess::{Board, Color, Move, Piece, PieceKind, Square};
pub use game::{Game, MoveSelector, Player, RandomSelector};
