//! Inspect command - islands and digests of a backup's final board

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hexstack_core::{Backup, DigestFormat};

#[derive(Args)]
pub struct InspectArgs {
    /// Backup file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let game = Backup::load(&args.file)?.replay()?;
    let board = game.board();

    println!("tiles: {}", board.len());
    println!("islands: {}", board.island_count());
    match board.min_max_heights() {
        Ok((min, max)) => println!("heights: {}..{}", min, max),
        Err(e) => println!("heights: {}", e),
    }

    let normalized = board.normalized();
    println!("normalized digest: {}", normalized.essential_digest_as(DigestFormat::Hex));
    println!("normalized digest (base64): {}", normalized.essential_digest_as(DigestFormat::Base64));

    for (i, digest) in board.essential_digests_all_rotations().iter().enumerate() {
        println!("rotation {} ({} degrees): {}", i, i * 60, digest);
    }
    Ok(())
}
