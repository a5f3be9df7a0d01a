// Re-export all public items
pub use self::board::{Board, CastlingRights, Cell, Undo, BORDER_GLYPH};
pub use self::error::{FenError, MoveError, TileError};
pub use self::fen::START_FEN;
pub use self::legality::{perft, GameStatus};
pub use self::moves::{Move, MoveFlag, MoveInput};
pub use self::piece::{Color, Piece, PieceKind, EMPTY_CODE, EMPTY_GLYPH, PIECE_CHARS, PIECE_CODES};
pub use self::square::{index_to_tile, is_playable, tile_to_index, Square, BOARD_CELLS, NO_TILE};
pub use self::zobrist::{fingerprint, KeyTable};

// Define submodules
mod board;
mod error;
mod fen;
mod legality;
pub mod movegen;
mod moves;
mod piece;
pub mod square;
pub mod zobrist;
