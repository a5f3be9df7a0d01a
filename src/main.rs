use anyhow::Result;
use chessbox::cli::{App, Cli, Commands, Config};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config is read before tracing exists, so a load failure is logged after init
    let (mut config, load_error) = match &cli.config {
        Some(path) => (Config::load_from(path)?, None),
        None => match Config::load_or_create_default() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = load_error {
        warn!("Using default configuration: {:#}", e);
    }

    if let Some(fen) = cli.fen {
        config.start_fen = fen;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let app = App::new(config)?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            info!("Starting interactive session");
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            println!("Type 'help' for a list of commands.");
            app.run_interactive(stdin.lock(), stdout.lock())?;
        }
        Commands::Perft { depth } => {
            app.handle_perft(depth, &mut std::io::stdout().lock())?;
        }
        Commands::Show => {
            app.handle_show(&mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
