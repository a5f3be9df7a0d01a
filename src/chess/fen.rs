//! Forsyth-Edwards Notation reader and writer.

use super::board::{Board, CastlingRights};
use super::error::FenError;
use super::piece::{Color, Piece, PIECE_CHARS};
use super::square::Square;
use tracing::debug;

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Create a board from a FEN (Forsyth-Edwards Notation) string
    /// FEN format: piece_placement active_color castling_rights en_passant halfmove fullmove
    /// Example: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, side, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
            return Err(FenError::FieldCount(fields.len()));
        };

        let mut board = Board::empty();
        parse_placement(&mut board, placement)?;

        board.active_color = match *side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::InvalidSide(side.to_string())),
        };

        board.castling_rights = CastlingRights::from_fen(castling)
            .ok_or_else(|| FenError::InvalidCastling(castling.to_string()))?;

        board.en_passant_target = match *en_passant {
            "-" => None,
            text => {
                let square = text
                    .parse::<Square>()
                    .map_err(|_| FenError::InvalidEnPassant(text.to_string()))?;
                // Only the squares a double push can skip over
                if square.rank() != 2 && square.rank() != 5 {
                    return Err(FenError::InvalidEnPassant(text.to_string()));
                }
                Some(square)
            }
        };

        board.halfmove_clock = halfmove
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmove(halfmove.to_string()))?;

        board.fullmove_number = match fullmove.parse::<u32>() {
            Ok(number) if number >= 1 => number,
            _ => return Err(FenError::InvalidFullmove(fullmove.to_string())),
        };

        board.refresh_key();
        Ok(board)
    }

    /// Replace this position with the one described by `fen`.
    ///
    /// Decoding happens on a scratch board; on failure `self` is left exactly
    /// as it was.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        match Board::from_fen(fen) {
            Ok(board) => {
                *self = board;
                Ok(())
            }
            Err(e) => {
                debug!("Rejected FEN '{}': {}", fen, e);
                Err(e)
            }
        }
    }

    /// Converts the current board state to FEN notation
    pub fn to_fen(&self) -> String {
        let en_passant = match self.en_passant_target {
            Some(square) => square.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            self.placement(),
            self.active_color.fen_char(),
            self.castling_rights.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Rank 8 down to rank 1, runs of empty cells collapsed into a digit.
    fn placement(&self) -> String {
        let mut ranks = Vec::with_capacity(8);

        for rank in (0..8u8).rev() {
            let mut text = String::new();
            let mut empty_count = 0;

            for file in 0..8u8 {
                let piece = self.piece(Square::from_coords(file, rank));
                if piece.is_empty() {
                    empty_count += 1;
                    continue;
                }
                if empty_count > 0 {
                    text.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                text.push(piece.glyph());
            }

            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }
            ranks.push(text);
        }

        ranks.join("/")
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (rank, text) in (0..8u8).rev().zip(ranks) {
        let mut file = 0usize;
        for c in text.chars() {
            if let Some(run) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                file += run as usize;
            } else {
                if !PIECE_CHARS.contains(&c) {
                    return Err(FenError::InvalidPiece(c));
                }
                if file >= 8 {
                    return Err(FenError::RankWidth {
                        rank: rank + 1,
                        files: file + 1,
                    });
                }
                let square = Square::from_coords(file as u8, rank);
                let piece = Piece::from_fen_char(c, square).ok_or(FenError::InvalidPiece(c))?;
                board.put(piece);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        if file != 8 {
            return Err(FenError::RankWidth {
                rank: rank + 1,
                files: file,
            });
        }
    }

    Ok(())
}
