use thiserror::Error;

/// Failure to read an algebraic tile name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("Malformed tile '{0}': expected exactly two characters like 'e4'")]
    Malformed(String),

    #[error("Tile '{0}' is off the board: file must be a-h and rank 1-8")]
    OffBoard(String),
}

/// Reasons a FEN string is rejected. Decoding never panics on bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN must have exactly 6 fields, found {0}")]
    FieldCount(usize),

    #[error("Piece placement must have exactly 8 ranks separated by '/', found {0}")]
    RankCount(usize),

    #[error("Rank {rank} must describe exactly 8 files, found {files}")]
    RankWidth { rank: u8, files: usize },

    #[error("Invalid piece character '{0}' (valid: KQRBNPkqrbnp or digits 1-8)")]
    InvalidPiece(char),

    #[error("Invalid side to move '{0}' (must be 'w' or 'b')")]
    InvalidSide(String),

    #[error("Invalid castling rights '{0}' (use a subset of KQkq, or '-')")]
    InvalidCastling(String),

    #[error("Invalid en passant target '{0}' (must be '-' or a square on rank 3 or 6)")]
    InvalidEnPassant(String),

    #[error("Invalid halfmove clock '{0}' (must be a non-negative integer)")]
    InvalidHalfmove(String),

    #[error("Invalid fullmove number '{0}' (must be an integer of at least 1)")]
    InvalidFullmove(String),
}

/// Rejections when reading or playing a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid move format '{0}'. Expected 'e2e4', 'e7e8q' for promotion, or 'O-O'/'O-O-O' for castling.")]
    Format(String),

    #[error("Invalid square in move: {0}")]
    Tile(#[from] TileError),

    #[error("Cannot promote to '{0}' (valid: q, r, b, n)")]
    InvalidPromotion(char),

    #[error("No {side} piece at {square}")]
    NoPiece { side: String, square: String },

    #[error("Illegal move {0}")]
    Illegal(String),

    #[error("Promotion piece required for {0}")]
    PromotionRequired(String),

    #[error("No move to take back")]
    NothingToUndo,
}
