//! Game session: who plays each side, the move history, and the hand-off to
//! an external move selector for computer players.

use crate::chess::{Board, Color, FenError, GameStatus, Move, MoveError, MoveInput, Undo};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use tracing::{debug, info, warn};

/// Lowest and highest accepted computer difficulty.
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Computer { difficulty: u8 },
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "Human"),
            Player::Computer { difficulty } => write!(f, "Computer (level {})", difficulty),
        }
    }
}

/// Chooses a move for a computer player. The search behind it lives outside
/// this crate; it receives the position, its legal moves and the difficulty.
pub trait MoveSelector {
    fn select(&mut self, board: &Board, legal: &[Move], difficulty: u8) -> Option<Move>;
}

/// Picks uniformly among the legal moves, ignoring difficulty.
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomSelector {
    fn select(&mut self, _board: &Board, legal: &[Move], _difficulty: u8) -> Option<Move> {
        legal.choose(&mut self.rng).copied()
    }
}

pub struct Game {
    board: Board,
    start: Board,
    white: Player,
    black: Player,
    initialized: bool,
    history: Vec<(Move, Undo)>,
    selector: Box<dyn MoveSelector>,
}

impl Game {
    /// Uninitialized session that will start from `start`.
    pub fn new(start: Board) -> Self {
        Self::with_selector(start, Box::new(RandomSelector::new()))
    }

    pub fn with_selector(start: Board, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: start.clone(),
            start,
            white: Player::Human,
            black: Player::Human,
            initialized: false,
            history: Vec::new(),
            selector,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Back to the starting position with no players assigned.
    pub fn restart(&mut self) {
        self.board = self.start.clone();
        self.white = Player::Human;
        self.black = Player::Human;
        self.history.clear();
        self.initialized = false;
    }

    pub fn initialize_player_vs_player(&mut self) -> bool {
        self.restart();
        self.initialized = true;
        info!("Started player vs player game");
        true
    }

    /// Start a game where `computer` is played by the move selector at `difficulty`.
    /// Returns false, leaving the session untouched, for a difficulty outside 1..=5.
    pub fn initialize_player_vs_computer(&mut self, computer: Color, difficulty: u8) -> bool {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            warn!("Rejected computer difficulty {}", difficulty);
            return false;
        }

        self.restart();
        let seat = Player::Computer { difficulty };
        match computer {
            Color::White => self.white = seat,
            Color::Black => self.black = seat,
        }
        self.initialized = true;
        info!(
            "Started player vs computer game, computer plays {} at level {}",
            computer, difficulty
        );
        true
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, color: Color) -> Player {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Plies played since the game started.
    pub fn history(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|(mv, _)| *mv)
    }

    /// Whether the side to move is a computer and the game is still running.
    pub fn computer_to_move(&self) -> bool {
        self.initialized
            && matches!(self.player(self.board.active_color()), Player::Computer { .. })
            && !self.status().is_over()
    }

    /// Play typed move text for the side to move.
    pub fn play_move(&mut self, text: &str) -> Result<Move, MoveError> {
        let input = MoveInput::parse(text, self.board.active_color())?;
        let mv = self.board.find_move(&input)?;
        let undo = self.board.make_move(mv);
        self.history.push((mv, undo));
        debug!("Played {} -> {}", mv, self.board.to_fen());
        Ok(mv)
    }

    /// Ask the selector for the computer's move and play it.
    pub fn play_computer_move(&mut self) -> Option<Move> {
        let difficulty = match self.player(self.board.active_color()) {
            Player::Computer { difficulty } => difficulty,
            Player::Human => return None,
        };

        let legal = self.board.legal_moves();
        let mv = self.selector.select(&self.board, &legal, difficulty)?;
        if !legal.contains(&mv) {
            warn!("Move selector returned illegal move {}", mv);
            return None;
        }

        let undo = self.board.make_move(mv);
        self.history.push((mv, undo));
        info!("Computer played {}", mv);
        Some(mv)
    }

    /// Take back the last ply.
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        let (mv, undo) = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        self.board.unmake_move(mv, undo);
        Ok(mv)
    }

    /// Replace the current position. History is dropped; a bad FEN changes nothing.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.board.load_fen(fen)?;
        self.history.clear();
        Ok(())
    }
}
