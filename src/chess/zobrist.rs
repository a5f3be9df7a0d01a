//! Zobrist-style position fingerprints.
//!
//! The process-wide key table is drawn from OS entropy the first time it is
//! needed, so fingerprints are stable within one run and meaningless across
//! runs. Sessions that need isolation can build their own [`KeyTable`].

use super::board::Board;
use super::piece::{Color, EMPTY_CODE, PIECE_CODES};
use super::square::Square;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;
use tracing::debug;

/// Independent random keys for every hashed feature of a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable {
    pieces: [[u64; 64]; PIECE_CODES],
    castling: [u64; 16],
    en_passant: [u64; 64],
    white_to_move: u64,
}

static TABLE: OnceLock<KeyTable> = OnceLock::new();

/// The table shared by all boards in this process.
pub fn global() -> &'static KeyTable {
    TABLE.get_or_init(|| {
        debug!("Generating process-wide fingerprint key table");
        KeyTable::generate(&mut StdRng::from_entropy())
    })
}

impl KeyTable {
    /// Draw a fresh table from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pieces = [[0u64; 64]; PIECE_CODES];
        for code in pieces.iter_mut() {
            for key in code.iter_mut() {
                *key = rng.gen();
            }
        }

        let mut castling = [0u64; 16];
        for key in castling.iter_mut() {
            *key = rng.gen();
        }

        let mut en_passant = [0u64; 64];
        for key in en_passant.iter_mut() {
            *key = rng.gen();
        }

        Self {
            pieces,
            castling,
            en_passant,
            white_to_move: rng.gen(),
        }
    }

    /// Reproducible table, for tests and for sessions that replay games.
    pub fn from_seed(seed: u64) -> Self {
        Self::generate(&mut StdRng::seed_from_u64(seed))
    }

    /// Key for a piece code on a square. Empty cells contribute nothing.
    pub fn piece(&self, code: usize, square: Square) -> u64 {
        if code == EMPTY_CODE {
            return 0;
        }
        self.pieces[code][square.ordinal()]
    }

    pub fn castling(&self, bits: u8) -> u64 {
        self.castling[(bits & 0x0F) as usize]
    }

    pub fn en_passant(&self, square: Square) -> u64 {
        self.en_passant[square.ordinal()]
    }

    pub fn white_to_move(&self) -> u64 {
        self.white_to_move
    }

    /// XOR-fold of piece placement, side to move, castling nibble and
    /// en passant target.
    pub fn fingerprint(&self, board: &Board) -> u64 {
        let mut key = board
            .pieces()
            .fold(0u64, |key, piece| key ^ self.piece(piece.code(), piece.square()));

        if board.active_color() == Color::White {
            key ^= self.white_to_move;
        }

        key ^= self.castling(board.castling_rights().bits());

        if let Some(square) = board.en_passant_target() {
            key ^= self.en_passant(square);
        }

        key
    }
}

/// Fingerprint of `board` under the process-wide table.
pub fn fingerprint(board: &Board) -> u64 {
    global().fingerprint(board)
}
