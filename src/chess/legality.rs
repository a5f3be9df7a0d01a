//! Legal move filter: pseudo-legal candidates refined by simulating each one
//! and rejecting those that leave the mover's king attacked.

use super::board::{Board, Undo};
use super::error::MoveError;
use super::movegen;
use super::moves::{Move, MoveInput};
use super::piece::Color;
use super::square::Square;
use std::fmt;

/// Outcome of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    /// Halfmove clock reached 100 plies.
    FiftyMoveRule,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "Game in progress"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "Stalemate, draw"),
            GameStatus::FiftyMoveRule => write!(f, "Draw by the fifty-move rule"),
        }
    }
}

impl Board {
    /// Whether any piece of `by` attacks `square`.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        movegen::is_square_attacked(self, square, by)
    }

    /// Whether `color`'s king stands attacked. A side without a king is never in check.
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked(king, color.opposite()))
    }

    /// Pseudo-legal candidates for the side to move.
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        movegen::pseudo_legal_moves(self)
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut scratch = self.clone();
        self.pseudo_legal_moves()
            .into_iter()
            .filter(|&mv| scratch.keeps_king_safe(mv))
            .collect()
    }

    /// Simulate `mv` and undo it, reporting whether the mover's king survives.
    fn keeps_king_safe(&mut self, mv: Move) -> bool {
        let mover = self.active_color;
        let undo = self.make_move(mv);
        let safe = !self.in_check(mover);
        self.unmake_move(mv, undo);
        safe
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Resolve typed move text against the legal moves of the side to move.
    pub fn find_move(&self, input: &MoveInput) -> Result<Move, MoveError> {
        let color = self.active_color;
        if !self.piece(input.from).is(color) {
            return Err(MoveError::NoPiece {
                side: color.to_string(),
                square: input.from.to_string(),
            });
        }

        let legal = self.legal_moves();
        if let Some(mv) = legal.iter().find(|mv| mv.matches(input)) {
            return Ok(*mv);
        }

        let needs_promotion = input.promotion.is_none()
            && legal
                .iter()
                .any(|mv| mv.from == input.from && mv.to == input.to && mv.is_promotion());
        if needs_promotion {
            return Err(MoveError::PromotionRequired(input.to_string()));
        }

        Err(MoveError::Illegal(input.to_string()))
    }

    /// Play a move after checking it is legal. Illegal moves leave the board untouched.
    pub fn play(&mut self, mv: Move) -> Result<Undo, MoveError> {
        if !self.is_legal(mv) {
            return Err(MoveError::Illegal(mv.to_string()));
        }
        Ok(self.make_move(mv))
    }

    pub fn status(&self) -> GameStatus {
        if self.legal_moves().is_empty() {
            let color = self.active_color;
            return if self.in_check(color) {
                GameStatus::Checkmate {
                    winner: color.opposite(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.halfmove_clock >= 100 {
            return GameStatus::FiftyMoveRule;
        }
        GameStatus::Ongoing
    }
}

/// Count leaf nodes of the legal move tree to `depth` plies.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        let undo = board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.unmake_move(mv, undo);
    }
    nodes
}
