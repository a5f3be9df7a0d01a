use crate::chess::{perft, Board, START_FEN};
use crate::cli::interpreter::Interpreter;
use crate::game::{Game, RandomSelector};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Position every new game starts from
    pub start_fen: String,
    /// Print the board after each ply in the interactive loop
    pub show_board_after_move: bool,
    /// Tracing filter used when RUST_LOG is not set
    pub log_filter: String,
    /// Fixed seed for the computer's move choice; random when absent
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_fen: START_FEN.to_string(),
            show_board_after_move: true,
            log_filter: "warn".to_string(),
            seed: None,
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        ProjectDirs::from("dev", "chessbox", "chessbox")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the default config file path
    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default file, creating it if it doesn't exist
    pub fn load_or_create_default() -> Result<Self> {
        let config_file = Self::default_config_file()?;

        if config_file.exists() {
            Self::load_from(&config_file)
        } else {
            let config = Config::default();
            config.save_to(&config_file)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).context("Failed to parse configuration file")?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Reject settings the session cannot start with
    pub fn validate(&self) -> Result<()> {
        self.start_board().map(|_| ())
    }

    /// Board described by `start_fen`
    pub fn start_board(&self) -> Result<Board> {
        Board::from_fen(&self.start_fen)
            .with_context(|| format!("Invalid start_fen '{}'", self.start_fen))
    }
}

/// Main application state
pub struct App {
    /// Application configuration
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        config.validate().context("Failed to validate configuration")?;
        Ok(App { config })
    }

    /// Fresh, uninitialized game session from the configured start position
    pub fn new_game(&self) -> Result<Game> {
        let start = self.config.start_board()?;
        let selector = match self.config.seed {
            Some(seed) => RandomSelector::seeded(seed),
            None => RandomSelector::new(),
        };
        Ok(Game::with_selector(start, Box::new(selector)))
    }

    /// Handle the 'play' command - run the interactive command loop
    pub fn run_interactive<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<()> {
        let game = self.new_game()?;
        let mut interpreter = Interpreter::new(game, input, output)
            .show_board_after_move(self.config.show_board_after_move);
        interpreter.run().context("Command loop failed")?;
        info!("Command loop finished");
        Ok(())
    }

    /// Handle the 'perft' command - count leaf nodes to `depth`
    pub fn handle_perft<W: Write>(&self, depth: u32, out: &mut W) -> Result<u64> {
        let mut board = self.config.start_board()?;
        let nodes = perft(&mut board, depth);
        writeln!(out, "perft({depth}) = {nodes}")?;
        Ok(nodes)
    }

    /// Handle the 'show' command - print the configured position in every format
    pub fn handle_show<W: Write>(&self, out: &mut W) -> Result<()> {
        let board = self.config.start_board()?;
        write!(out, "{board}")?;
        write!(out, "{}", board.raw_dump())?;
        writeln!(out, "FEN: {}", board.to_fen())?;
        writeln!(out, "Fingerprint: {:016x}", board.key())?;
        writeln!(out, "Status: {}", board.status())?;
        Ok(())
    }
}
