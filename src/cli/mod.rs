pub mod app;
pub mod commands;
pub mod interpreter;

pub use app::{App, Config};
pub use commands::{Cli, Commands};
pub use interpreter::{CommandError, Flow, Interpreter, TokenReader};
