//! HEXSTACK Core - Board model for a hex-grid stacking game
//!
//! This crate provides the core game logic for HEXSTACK:
//! - Board geometry (offset hex grid, rings around the origin)
//! - Tiles, moves and move legality
//! - Island detection and symmetry-aware board comparison
//! - Turn driver, random player and backup files
//! - Plain-text board rendering

pub mod geometry;
pub mod error;
pub mod tile;
pub mod moves;
pub mod board;
pub mod islands;
pub mod normalize;
pub mod config;
pub mod game;
pub mod backup;
pub mod render;

// Re-exports for convenient access
pub use geometry::{Hex, COORD_LIMIT, MAX_RING, ring_distance, ring_perimeter};
pub use error::{BoardError, BoardResult, PlacementFault};
pub use tile::{PlayerId, Tile};
pub use moves::Move;
pub use board::{Board, PositionBounds};
pub use normalize::{DigestFormat, EssentialDigest};
pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameError, RandomPlayer};
pub use backup::{Backup, BackupError};
pub use render::{render_board, RenderOptions};
