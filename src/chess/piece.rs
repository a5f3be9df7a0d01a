use super::square::Square;
use std::fmt;
use std::str::FromStr;

/// Classification code reserved for empty cells.
pub const EMPTY_CODE: usize = 12;

/// Number of distinct non-empty classification codes.
pub const PIECE_CODES: usize = 12;

/// FEN letter for each classification code, white pieces first.
pub const PIECE_CHARS: [char; PIECE_CODES] =
    ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// Glyph printed for an empty cell.
pub const EMPTY_GLYPH: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Opposite color
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank (zero-based) of this side's back row.
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Padded-index step of a single pawn push.
    pub fn forward(self) -> i16 {
        match self {
            Color::White => 10,
            Color::Black => -10,
        }
    }

    pub fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Pieces a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase letter used in move text and FEN for black.
    pub fn letter(self) -> char {
        PIECE_CHARS[self.index() + 6]
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PIECE_CHARS[self.index()])
    }
}

impl FromStr for PieceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "P" | "PAWN" => Ok(PieceKind::Pawn),
            "N" | "KNIGHT" => Ok(PieceKind::Knight),
            "B" | "BISHOP" => Ok(PieceKind::Bishop),
            "R" | "ROOK" => Ok(PieceKind::Rook),
            "Q" | "QUEEN" => Ok(PieceKind::Queen),
            "K" | "KING" => Ok(PieceKind::King),
            _ => Err(format!(
                "Expected one of: P, N, B, R, Q, K, got '{}'",
                s
            )),
        }
    }
}

/// Content of one playable cell. Every variant remembers the square it sits on;
/// `Empty` is a value of its own, so a playable cell is never unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty(Square),
    Pawn(Color, Square),
    Knight(Color, Square),
    Bishop(Color, Square),
    Rook(Color, Square),
    Queen(Color, Square),
    King(Color, Square),
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        match kind {
            PieceKind::Pawn => Piece::Pawn(color, square),
            PieceKind::Knight => Piece::Knight(color, square),
            PieceKind::Bishop => Piece::Bishop(color, square),
            PieceKind::Rook => Piece::Rook(color, square),
            PieceKind::Queen => Piece::Queen(color, square),
            PieceKind::King => Piece::King(color, square),
        }
    }

    /// Decode a FEN placement letter for the given square.
    pub fn from_fen_char(c: char, square: Square) -> Option<Self> {
        let code = PIECE_CHARS.iter().position(|&p| p == c)?;
        let color = if code < 6 { Color::White } else { Color::Black };
        let kind = match code % 6 {
            0 => PieceKind::Pawn,
            1 => PieceKind::Knight,
            2 => PieceKind::Bishop,
            3 => PieceKind::Rook,
            4 => PieceKind::Queen,
            _ => PieceKind::King,
        };
        Some(Piece::new(kind, color, square))
    }

    pub fn square(self) -> Square {
        match self {
            Piece::Empty(square)
            | Piece::Pawn(_, square)
            | Piece::Knight(_, square)
            | Piece::Bishop(_, square)
            | Piece::Rook(_, square)
            | Piece::Queen(_, square)
            | Piece::King(_, square) => square,
        }
    }

    /// `None` only for `Empty`.
    pub fn color(self) -> Option<Color> {
        match self {
            Piece::Empty(_) => None,
            Piece::Pawn(color, _)
            | Piece::Knight(color, _)
            | Piece::Bishop(color, _)
            | Piece::Rook(color, _)
            | Piece::Queen(color, _)
            | Piece::King(color, _) => Some(color),
        }
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::Empty(_) => None,
            Piece::Pawn(..) => Some(PieceKind::Pawn),
            Piece::Knight(..) => Some(PieceKind::Knight),
            Piece::Bishop(..) => Some(PieceKind::Bishop),
            Piece::Rook(..) => Some(PieceKind::Rook),
            Piece::Queen(..) => Some(PieceKind::Queen),
            Piece::King(..) => Some(PieceKind::King),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Piece::Empty(_))
    }

    /// True for a non-empty piece of `color`.
    pub fn is(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// Same piece placed on another square.
    pub fn moved_to(self, square: Square) -> Self {
        match (self.kind(), self.color()) {
            (Some(kind), Some(color)) => Piece::new(kind, color, square),
            _ => Piece::Empty(square),
        }
    }

    /// Stable classification code: 0..6 for white pawn..king, 6..12 for black,
    /// [`EMPTY_CODE`] for an empty cell. Indexes both [`PIECE_CHARS`] and the
    /// fingerprint key table.
    pub fn code(self) -> usize {
        match (self.kind(), self.color()) {
            (Some(kind), Some(Color::White)) => kind.index(),
            (Some(kind), Some(Color::Black)) => kind.index() + 6,
            _ => EMPTY_CODE,
        }
    }

    /// Single display character: the FEN letter, or '.' when empty.
    pub fn glyph(self) -> char {
        PIECE_CHARS.get(self.code()).copied().unwrap_or(EMPTY_GLYPH)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
