//! Interactive command loop. Commands and their arguments are whitespace
//! separated tokens, so several may share one line.

use crate::chess::{Color, FenError, MoveError};
use crate::game::Game;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, error, warn};

const HELP: &str = "\
Commands:
  play <w><b>[d]  start a game; w/b are 'p' (player) or 'c' (computer),
                  d is the computer difficulty 1-5 (e.g. 'play pp', 'play pc3')
  move <move>     play a move, e.g. 'move e2e4', 'move e7e8q', 'move O-O'
  board           show the board
  dump            show the raw 10x12 mailbox and state flags
  fen             print the position as FEN
  load <fen>      replace the position with a six-field FEN
  moves           list the legal moves
  undo            take back the last ply
  help            show this text
  quit            leave
";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid format: '{0}'")]
    InvalidFormat(String),

    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    UnknownCommand(String),

    #[error("No game in progress. Start one with 'play'.")]
    NotInitialized,

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("Input ended during execution of command '{0}'")]
    InputExhausted(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Errors that stop the command loop rather than being reported and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::InputExhausted(_) | CommandError::Io(_))
    }
}

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Splits a line-oriented reader into whitespace separated tokens.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    /// Next token, treating end of input as fatal for `command`.
    fn require(&mut self, command: &str) -> Result<String, CommandError> {
        self.next_token()?
            .ok_or_else(|| CommandError::InputExhausted(command.to_string()))
    }
}

pub struct Interpreter<R, W> {
    game: Game,
    tokens: TokenReader<R>,
    out: W,
    show_board_after_move: bool,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(game: Game, input: R, out: W) -> Self {
        Self {
            game,
            tokens: TokenReader::new(input),
            out,
            show_board_after_move: true,
        }
    }

    pub fn show_board_after_move(mut self, show: bool) -> Self {
        self.show_board_after_move = show;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_parts(self) -> (Game, W) {
        (self.game, self.out)
    }

    /// Run commands until `quit` or end of input.
    ///
    /// Bad syntax and illegal moves are reported and the loop continues.
    /// Running out of input in the middle of a command ends that command and
    /// the loop; an I/O failure is returned.
    pub fn run(&mut self) -> Result<(), CommandError> {
        loop {
            match self.execute_next() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(CommandError::InputExhausted(command)) => {
                    warn!("Input ended during command '{}'", command);
                    writeln!(self.out, "Error during execution of command '{command}'")?;
                    return Ok(());
                }
                Err(e @ CommandError::Io(_)) => {
                    error!("Command loop aborted: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    debug!("Command rejected: {}", e);
                    writeln!(self.out, "{e}")?;
                }
            }
        }
    }

    /// Read and execute one command.
    pub fn execute_next(&mut self) -> Result<Flow, CommandError> {
        let Some(command) = self.tokens.next_token()? else {
            return Ok(Flow::Exit);
        };

        match command.as_str() {
            "play" => self.play(),
            "move" => self.make_move(),
            "board" => {
                write!(self.out, "{}", self.game.board())?;
                Ok(Flow::Continue)
            }
            "dump" => {
                write!(self.out, "{}", self.game.board().raw_dump())?;
                Ok(Flow::Continue)
            }
            "fen" => {
                writeln!(self.out, "{}", self.game.board().to_fen())?;
                Ok(Flow::Continue)
            }
            "load" => self.load(),
            "moves" => self.list_moves(),
            "undo" => self.undo(),
            "help" => {
                write!(self.out, "{HELP}")?;
                Ok(Flow::Continue)
            }
            "quit" | "exit" => Ok(Flow::Exit),
            _ => Err(CommandError::UnknownCommand(command)),
        }
    }

    /// `play <white><black>[difficulty]`
    fn play(&mut self) -> Result<Flow, CommandError> {
        if self.game.is_initialized() {
            // The argument belongs to this command even though it is ignored.
            let _ = self.tokens.next_token()?;
            writeln!(self.out, "Game is already initialized.")?;
            return Ok(Flow::Continue);
        }

        self.game.restart();
        let seats = self.tokens.require("play")?;

        let mut chars = seats.chars().chain(std::iter::once(' '));
        let started = match (chars.next(), chars.next(), chars.next()) {
            (Some('p'), Some('p'), Some(' ')) => self.game.initialize_player_vs_player(),
            (Some('c'), Some('p'), Some(level @ '1'..='5')) => self
                .game
                .initialize_player_vs_computer(Color::White, difficulty_of(level)),
            (Some('p'), Some('c'), Some(level @ '1'..='5')) => self
                .game
                .initialize_player_vs_computer(Color::Black, difficulty_of(level)),
            _ => return Err(CommandError::InvalidFormat(seats)),
        };

        if started {
            writeln!(
                self.out,
                "New game: White {}, Black {}",
                self.game.player(Color::White),
                self.game.player(Color::Black)
            )?;
            self.after_ply()?;
        }
        Ok(Flow::Continue)
    }

    fn make_move(&mut self) -> Result<Flow, CommandError> {
        let text = self.tokens.require("move")?;
        if !self.game.is_initialized() {
            return Err(CommandError::NotInitialized);
        }
        if self.game.status().is_over() {
            writeln!(self.out, "{}", self.game.status())?;
            return Ok(Flow::Continue);
        }

        self.game.play_move(&text)?;
        self.after_ply()?;
        Ok(Flow::Continue)
    }

    /// Show the position, let computers reply, and report a finished game.
    fn after_ply(&mut self) -> Result<(), CommandError> {
        while self.game.computer_to_move() {
            match self.game.play_computer_move() {
                Some(mv) => writeln!(self.out, "Computer plays {mv}")?,
                None => break,
            }
        }

        if self.show_board_after_move {
            write!(self.out, "{}", self.game.board())?;
        }

        let status = self.game.status();
        if status.is_over() {
            writeln!(self.out, "{status}")?;
        } else if self.game.board().in_check(self.game.board().active_color()) {
            writeln!(self.out, "{} is in check.", self.game.board().active_color())?;
        }
        Ok(())
    }

    fn load(&mut self) -> Result<Flow, CommandError> {
        let mut fields = Vec::with_capacity(6);
        for _ in 0..6 {
            fields.push(self.tokens.require("load")?);
        }
        self.game.load_fen(&fields.join(" "))?;
        writeln!(self.out, "Position loaded: {}", self.game.board().to_fen())?;
        Ok(Flow::Continue)
    }

    fn list_moves(&mut self) -> Result<Flow, CommandError> {
        let moves: Vec<String> = self
            .game
            .board()
            .legal_moves()
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(self.out, "{} legal moves: {}", moves.len(), moves.join(" "))?;
        Ok(Flow::Continue)
    }

    fn undo(&mut self) -> Result<Flow, CommandError> {
        let mv = self.game.undo()?;
        writeln!(self.out, "Took back {mv}")?;
        Ok(Flow::Continue)
    }
}

fn difficulty_of(level: char) -> u8 {
    level as u8 - b'0'
}
