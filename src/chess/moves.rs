use super::error::MoveError;
use super::piece::{Color, PieceKind};
use super::square::Square;
use std::fmt;

/// How a move touches the board beyond relocating one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal,
    /// Pawn advanced two ranks and leaves an en passant target behind.
    DoublePush,
    /// Pawn captured onto the en passant target; the victim sits behind it.
    EnPassant,
    KingsideCastle,
    QueensideCastle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flag: MoveFlag,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            flag: MoveFlag::Normal,
        }
    }

    pub const fn with_flag(from: Square, to: Square, flag: MoveFlag) -> Self {
        Self {
            from,
            to,
            promotion: None,
            flag,
        }
    }

    pub const fn promotion(from: Square, to: Square, piece: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(piece),
            flag: MoveFlag::Normal,
        }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    pub fn is_castling(&self) -> bool {
        matches!(
            self.flag,
            MoveFlag::KingsideCastle | MoveFlag::QueensideCastle
        )
    }

    /// True when this move answers the textual request `input`.
    pub fn matches(&self, input: &MoveInput) -> bool {
        self.from == input.from && self.to == input.to && self.promotion == input.promotion
    }
}

// Long algebraic form, e.g. "e2e4" or "e7e8q"
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}

/// A move as typed by a player, before it is matched against the legal list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveInput {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveInput {
    /// Parse move text with the mover's color, which decides the castling rank.
    pub fn parse(s: &str, color: Color) -> Result<Self, MoveError> {
        let s = s.trim();

        let castle_file = match s.to_ascii_uppercase().as_str() {
            "O-O" | "0-0" => Some(6),
            "O-O-O" | "0-0-0" => Some(2),
            _ => None,
        };
        if let Some(file) = castle_file {
            let rank = color.back_rank();
            return Ok(Self {
                from: Square::from_coords(4, rank),
                to: Square::from_coords(file, rank),
                promotion: None,
            });
        }

        if !s.is_ascii() || !(s.len() == 4 || s.len() == 5) {
            return Err(MoveError::Format(s.to_string()));
        }

        let from = s[0..2].parse::<Square>()?;
        let to = s[2..4].parse::<Square>()?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match c.to_ascii_lowercase() {
                'q' => Some(PieceKind::Queen),
                'r' => Some(PieceKind::Rook),
                'b' => Some(PieceKind::Bishop),
                'n' => Some(PieceKind::Knight),
                _ => return Err(MoveError::InvalidPromotion(c)),
            },
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for MoveInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}
