//! HEXSTACK CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game between random players
//! - replay: Replay a backup file
//! - inspect: Print islands and digests of a backup's final board

mod inspect_cmd;
mod play_cmd;
mod replay_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexstack")]
#[command(about = "HEXSTACK hex-grid stacking game")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game between random players
    Play(play_cmd::PlayArgs),
    /// Replay a backup file
    Replay(replay_cmd::ReplayArgs),
    /// Show islands and digests of a backup's final board
    Inspect(inspect_cmd::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Replay(args) => replay_cmd::run(args),
        Commands::Inspect(args) => inspect_cmd::run(args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
