use super::error::TileError;
use std::fmt;
use std::str::FromStr;

/// Number of cells in the padded 10x12 mailbox.
pub const BOARD_CELLS: usize = 120;

/// Padded indices of the four corners.
pub const A1: usize = 21;
pub const H1: usize = 28;
pub const A8: usize = 91;
pub const H8: usize = 98;

/// Text returned by [`index_to_tile`] for any cell outside the playable window.
pub const NO_TILE: &str = "EMPTY";

pub const NORTH: i16 = 10;
pub const SOUTH: i16 = -10;
pub const EAST: i16 = 1;
pub const WEST: i16 = -1;

pub const KNIGHT_OFFSETS: [i16; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
pub const BISHOP_OFFSETS: [i16; 4] = [-11, -9, 9, 11];
pub const ROOK_OFFSETS: [i16; 4] = [SOUTH, WEST, EAST, NORTH];
pub const KING_OFFSETS: [i16; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];

/// True when `index` lies inside the 8x8 window of the padded grid
/// (row 2..=9, column 1..=8).
pub const fn is_playable(index: usize) -> bool {
    let file = index % 10;
    let row = index / 10;
    index < BOARD_CELLS && file >= 1 && file <= 8 && row >= 2 && row <= 9
}

/// Convert an algebraic tile name ("e4") into a playable square.
///
/// A name that is not exactly two characters long is [`TileError::Malformed`];
/// a two character name whose file or rank falls outside a-h / 1-8 is
/// [`TileError::OffBoard`].
pub fn tile_to_index(name: &str) -> Result<Square, TileError> {
    let bytes = name.as_bytes();
    if name.chars().count() != 2 || bytes.len() != 2 {
        return Err(TileError::Malformed(name.to_string()));
    }

    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(TileError::OffBoard(name.to_string()));
    }

    Ok(Square::from_coords(file - b'a', rank - b'1'))
}

/// Inverse of [`tile_to_index`] over raw padded indices.
pub fn index_to_tile(index: usize) -> String {
    match Square::new(index) {
        Some(square) => square.to_string(),
        None => NO_TILE.to_string(),
    }
}

/// A playable cell of the padded board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Wrap a padded index, rejecting border cells.
    pub const fn new(index: usize) -> Option<Self> {
        if is_playable(index) {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Build from zero-based file (a = 0) and rank (1 = 0). Both must be below 8.
    pub const fn from_coords(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Self(A1 as u8 + file + rank * 10)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based file, 0 for the a-file.
    pub const fn file(self) -> u8 {
        self.0 % 10 - 1
    }

    /// Zero-based rank, 0 for the first rank.
    pub const fn rank(self) -> u8 {
        self.0 / 10 - 2
    }

    /// Dense 0..64 ordinal, a1 = 0, h8 = 63.
    pub const fn ordinal(self) -> usize {
        (self.rank() * 8 + self.file()) as usize
    }

    /// Padded index reached by stepping `delta` cells. The padding is two rows
    /// deep, so every offset in this module stays inside the 120-cell array.
    pub const fn step(self, delta: i16) -> usize {
        (self.0 as i16 + delta) as usize
    }

    pub fn file_char(self) -> char {
        (self.file() + b'a') as char
    }

    pub fn rank_char(self) -> char {
        (self.rank() + b'1') as char
    }

    /// All 64 playable squares, a1 first, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square::from_coords(file, rank)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tile_to_index(s)
    }
}
