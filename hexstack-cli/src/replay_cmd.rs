//! Replay command - rebuild a game from a backup file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hexstack_core::{render_board, Backup, Board, Game};

use crate::play_cmd::render_options;

#[derive(Args)]
pub struct ReplayArgs {
    /// Backup file to replay
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the board after every move
    #[arg(long)]
    pub step: bool,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let backup = Backup::load(&args.file)?;
    let options = render_options(args.no_color);

    tracing::info!(
        "Replaying {} moves for {} players",
        backup.moves.len(),
        backup.players.len()
    );

    if args.step {
        println!("Initial board:");
        print!("{}", render_board(&backup.initial_board()?, &options));
        let game = backup.replay_with(|index, game| {
            if let Some((player, mv)) = game.history().get(index) {
                println!("\nTurn {}: {} plays {}", index + 1, player, mv);
            }
            print!("{}", render_board(game.board(), &options));
        })?;
        report(&game);
    } else {
        let game = backup.replay()?;
        print!("{}", render_board(game.board(), &options));
        report(&game);
    }
    Ok(())
}

fn report(game: &Game) {
    let board: &Board = game.board();
    let status = if game.is_over() { "game over" } else { "game in progress" };
    println!(
        "{} after {} turns: winners {}",
        status,
        game.turns(),
        board.winners().join(", ")
    );
}
