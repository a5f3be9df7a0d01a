use super::moves::{Move, MoveFlag};
use super::piece::{Color, Piece, PieceKind};
use super::square::{self, Square, BOARD_CELLS};
use super::zobrist;
use std::fmt;

/// Castling rights packed into a nibble: K = 8, Q = 4, k = 2, q = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 0b1000;
    pub const WHITE_QUEENSIDE: u8 = 0b0100;
    pub const BLACK_KINGSIDE: u8 = 0b0010;
    pub const BLACK_QUEENSIDE: u8 = 0b0001;
    pub const ALL: u8 = 0b1111;

    /// Create new castling rights with all castling available
    pub const fn new() -> Self {
        Self(Self::ALL)
    }

    pub const fn none() -> Self {
        Self(0)
    }

    /// Bits above the low nibble are discarded.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    /// Packed value in 0..=15.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn insert(&mut self, flag: u8) {
        self.0 |= flag & Self::ALL;
    }

    pub fn remove(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    pub fn kingside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Create castling rights from FEN notation (e.g., "KQkq", "Kq", "-")
    pub fn from_fen(fen: &str) -> Option<Self> {
        if fen == "-" {
            return Some(Self::none());
        }
        if fen.is_empty() {
            return None;
        }

        let mut rights = Self::none();
        for c in fen.chars() {
            match c {
                'K' => rights.insert(Self::WHITE_KINGSIDE),
                'Q' => rights.insert(Self::WHITE_QUEENSIDE),
                'k' => rights.insert(Self::BLACK_KINGSIDE),
                'q' => rights.insert(Self::BLACK_QUEENSIDE),
                _ => return None,
            }
        }
        Some(rights)
    }

    /// Convert to FEN notation
    pub fn to_fen(self) -> String {
        let mut result = String::new();
        for (flag, letter) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.has(flag) {
                result.push(letter);
            }
        }

        if result.is_empty() {
            "-".to_string()
        } else {
            result
        }
    }

    /// Remove castling rights for a color (when king moves)
    pub fn remove_all_for_color(&mut self, color: Color) {
        self.remove(Self::kingside(color) | Self::queenside(color));
    }

    /// Remove the right tied to a rook home corner, if `square` is one
    pub fn remove_rook_rights(&mut self, square: Square) {
        match (square.file(), square.rank()) {
            (0, 0) => self.remove(Self::WHITE_QUEENSIDE),
            (7, 0) => self.remove(Self::WHITE_KINGSIDE),
            (0, 7) => self.remove(Self::BLACK_QUEENSIDE),
            (7, 7) => self.remove(Self::BLACK_KINGSIDE),
            _ => {}
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}

/// One cell of the padded mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Permanent sentinel on the two-cell border.
    OffBoard,
    Tile(Piece),
}

/// Fill character for border cells in [`Board::raw_dump`].
pub const BORDER_GLYPH: char = '_';

/// State needed to take back a move made with [`Board::make_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    captured: Piece,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    key: u64,
}

impl Undo {
    /// Piece removed by the move; `Empty` on its target square when nothing was taken.
    pub fn captured(&self) -> Piece {
        self.captured
    }
}

/// A chess position on a 10x12 mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pub(super) cells: [Cell; BOARD_CELLS],
    pub(super) active_color: Color,
    pub(super) castling_rights: CastlingRights,
    pub(super) en_passant_target: Option<Square>,
    /// Plies since the last capture or pawn move; saturates at `u32::MAX`
    pub(super) halfmove_clock: u32,
    /// Starts at 1, incremented after Black's move
    pub(super) fullmove_number: u32,
    pub(super) key: u64,
}

impl Board {
    /// Create a new board with the standard starting position
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.castling_rights = CastlingRights::new();
        board.setup_starting_position();
        board.refresh_key();
        board
    }

    /// Board with every playable cell empty, White to move and no castling rights.
    pub fn empty() -> Self {
        let mut cells = [Cell::OffBoard; BOARD_CELLS];
        for square in Square::all() {
            cells[square.index()] = Cell::Tile(Piece::Empty(square));
        }

        let mut board = Self {
            cells,
            active_color: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            key: 0,
        };
        board.refresh_key();
        board
    }

    fn setup_starting_position(&mut self) {
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, &kind) in (0u8..).zip(back_rank.iter()) {
            self.put(Piece::new(kind, Color::White, Square::from_coords(file, 0)));
            self.put(Piece::Pawn(Color::White, Square::from_coords(file, 1)));
            self.put(Piece::Pawn(Color::Black, Square::from_coords(file, 6)));
            self.put(Piece::new(kind, Color::Black, Square::from_coords(file, 7)));
        }
    }

    /// Raw cell at a padded index; anything past the array is off board.
    pub fn cell(&self, index: usize) -> Cell {
        self.cells.get(index).copied().unwrap_or(Cell::OffBoard)
    }

    /// Piece (possibly `Empty`) on a playable square.
    pub fn piece(&self, square: Square) -> Piece {
        match self.cells[square.index()] {
            Cell::Tile(piece) => piece,
            Cell::OffBoard => Piece::Empty(square),
        }
    }

    /// Store `piece` on the square it carries. Border cells are never written.
    pub(super) fn put(&mut self, piece: Piece) {
        self.cells[piece.square().index()] = Cell::Tile(piece);
    }

    /// Place a piece and refresh the fingerprint.
    pub fn place(&mut self, kind: PieceKind, color: Color, square: Square) {
        self.put(Piece::new(kind, color, square));
        self.refresh_key();
    }

    /// Empty a square and return what was there.
    pub fn remove(&mut self, square: Square) -> Piece {
        let previous = self.piece(square);
        self.put(Piece::Empty(square));
        self.refresh_key();
        previous
    }

    /// Get the current active color (player to move)
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn set_active_color(&mut self, color: Color) {
        self.active_color = color;
        self.refresh_key();
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights;
        self.refresh_key();
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Fingerprint of the current state, kept current by every mutation.
    pub fn key(&self) -> u64 {
        self.key
    }

    pub(super) fn refresh_key(&mut self) {
        self.key = zobrist::fingerprint(self);
    }

    /// Every non-empty piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        Square::all()
            .map(|square| self.piece(square))
            .filter(|piece| !piece.is_empty())
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|piece| matches!(piece, Piece::King(c, _) if *c == color))
            .map(Piece::square)
    }

    /// Apply a pseudo-legal move as one unit: relocation, capture, en passant
    /// removal, castling rook hop, promotion, rights, clocks, side and key.
    ///
    /// The move is not checked for legality; use [`Board::play`] for that.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let mover = self.piece(mv.from);
        let color = mover.color().unwrap_or(self.active_color);

        let captured_square = match mv.flag {
            MoveFlag::EnPassant => {
                Square::new(mv.to.step(-color.forward())).unwrap_or(mv.to)
            }
            _ => mv.to,
        };
        let captured = self.piece(captured_square);

        let undo = Undo {
            captured,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            key: self.key,
        };

        self.put(Piece::Empty(captured_square));
        self.put(Piece::Empty(mv.from));
        let placed = match mv.promotion {
            Some(kind) => Piece::new(kind, color, mv.to),
            None => mover.moved_to(mv.to),
        };
        self.put(placed);

        if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
            let rook = self.piece(rook_from);
            self.put(Piece::Empty(rook_from));
            self.put(rook.moved_to(rook_to));
        }

        if matches!(mover, Piece::King(..)) {
            self.castling_rights.remove_all_for_color(color);
        }
        self.castling_rights.remove_rook_rights(mv.from);
        self.castling_rights.remove_rook_rights(mv.to);

        self.en_passant_target = match mv.flag {
            MoveFlag::DoublePush => Square::new(mv.from.step(color.forward())),
            _ => None,
        };

        if matches!(mover, Piece::Pawn(..)) || !captured.is_empty() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.active_color = color.opposite();
        self.refresh_key();
        undo
    }

    /// Exact inverse of [`Board::make_move`] for the same move.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        let color = self.active_color.opposite();
        let moved = self.piece(mv.to);

        if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
            let rook = self.piece(rook_to);
            self.put(Piece::Empty(rook_to));
            self.put(rook.moved_to(rook_from));
        }

        let original = match mv.promotion {
            Some(_) => Piece::Pawn(color, mv.from),
            None => moved.moved_to(mv.from),
        };
        self.put(Piece::Empty(mv.to));
        self.put(original);
        self.put(undo.captured);

        self.active_color = color;
        self.castling_rights = undo.castling_rights;
        self.en_passant_target = undo.en_passant_target;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.key = undo.key;
    }

    /// Dump every one of the 120 padded cells followed by side, en passant and castling.
    pub fn raw_dump(&self) -> String {
        let mut out = String::new();
        for row in 0..12 {
            for column in 0..10 {
                out.push(match self.cells[row * 10 + column] {
                    Cell::OffBoard => BORDER_GLYPH,
                    Cell::Tile(piece) => piece.glyph(),
                });
            }
            out.push('\n');
        }

        let en_passant = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |square| square.to_string());
        out.push_str(&format!("side: {}\n", self.active_color.fen_char()));
        out.push_str(&format!("En Passant: {en_passant}\n"));
        out.push_str(&format!("Castling: {}\n", self.castling_rights.to_fen()));
        out
    }
}

/// Rook hop `(from, to)` for a castling move.
fn castling_rook_squares(mv: Move) -> Option<(Square, Square)> {
    let (from, to) = match mv.flag {
        MoveFlag::KingsideCastle => (mv.to.step(square::EAST), mv.to.step(square::WEST)),
        MoveFlag::QueensideCastle => (mv.to.step(2 * square::WEST), mv.to.step(square::EAST)),
        _ => return None,
    };
    Some((Square::new(from)?, Square::new(to)?))
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-width diagram from White's side, files A-H and ranks 1-8 on the frame.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    A B C D E F G H")?;
        writeln!(f, "  +-----------------+")?;
        for rank in (0..8u8).rev() {
            write!(f, "{} | ", rank + 1)?;
            for file in 0..8u8 {
                write!(f, "{} ", self.piece(Square::from_coords(file, rank)).glyph())?;
            }
            writeln!(f, "| {}", rank + 1)?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    A B C D E F G H")
    }
}
