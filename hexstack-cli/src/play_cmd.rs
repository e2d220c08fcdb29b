//! Play command - run a game between random players
//!
//! - run(): orchestration
//! - build_config(): config file plus flag overrides
//! - report(): final board and winners

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexstack_core::{render_board, Backup, Game, GameConfig, RandomPlayer, RenderOptions};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comma-separated player ids, in turn order
    #[arg(long, value_delimiter = ',')]
    pub players: Option<Vec<String>>,

    /// Tiles dealt to each player
    #[arg(long)]
    pub tiles: Option<usize>,

    /// Ring distance bound for the initial layout
    #[arg(long)]
    pub radius: Option<i32>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many turns
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Write a backup of the game to this file
    #[arg(long, value_name = "FILE")]
    pub backup: Option<PathBuf>,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,

    /// Only print the result line
    #[arg(long)]
    pub quiet: bool,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = ChaCha8Rng::from_entropy().next_u64();
            tracing::info!("No seed given, using {}", seed);
            seed
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = Game::setup(&config, &mut rng).context("setting up game")?;
    let options = render_options(args.no_color);

    if !args.quiet {
        println!("Initial board:");
        print!("{}", render_board(game.board(), &options));
    }

    let mut player = RandomPlayer::new(rng.next_u64());
    let finished = player.play_game(&mut game, config.max_turns)?;

    if let Some(path) = &args.backup {
        Backup::from_game(&game).save(path)?;
    }

    report(&game, finished, &options, args.quiet);
    Ok(())
}

// ============================================================================
// PHASES
// ============================================================================

fn build_config(args: &PlayArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(players) = &args.players {
        config = config.with_players(players.iter().map(|p| p.trim().to_string()));
    }
    if let Some(tiles) = args.tiles {
        config = config.with_tiles_per_player(tiles);
    }
    if let Some(radius) = args.radius {
        config = config.with_radius(radius);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(max_turns) = args.max_turns {
        config = config.with_max_turns(max_turns);
    }
    config.validate()?;
    Ok(config)
}

fn report(game: &Game, finished: bool, options: &RenderOptions, quiet: bool) {
    if !quiet {
        println!("\nFinal board after {} turns:", game.turns());
        print!("{}", render_board(game.board(), options));
    }
    let status = if finished { "game over" } else { "turn limit reached" };
    println!("{}: winners {}", status, game.winners().join(", "));
}

pub fn render_options(no_color: bool) -> RenderOptions {
    if no_color {
        RenderOptions::plain()
    } else {
        RenderOptions::default()
    }
}
