//! Game configuration

use crate::geometry::COORD_LIMIT;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("at least two players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("invalid player id '{0}'")]
    InvalidPlayerId(String),

    #[error("player '{0}' is listed twice")]
    DuplicatePlayer(String),

    #[error("each player needs at least one tile")]
    NoTiles,

    #[error("radius {0} is outside the placement range")]
    RadiusOutOfRange(i32),

    #[error("{tiles} tiles do not fit in a radius {radius} layout of {capacity} cells")]
    LayoutTooSmall {
        tiles: usize,
        radius: i32,
        capacity: usize,
    },

    #[error("starting height must be at least 1, got {0}")]
    BadStartHeight(i32),
}

/// Setup and limits for one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player ids in turn order
    pub players: Vec<String>,
    /// Tiles dealt to each player at setup
    pub tiles_per_player: usize,
    /// Tiles are placed within this ring distance of the origin
    pub radius: i32,
    /// Height of every tile at setup
    pub start_height: i32,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Turn limit before the game is cut short
    pub max_turns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: vec!["red".to_string(), "blue".to_string()],
            tiles_per_player: 8,
            radius: 3,
            start_height: 1,
            seed: None,
            max_turns: 1000,
        }
    }
}

impl GameConfig {
    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players = players.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tiles_per_player(mut self, tiles: usize) -> Self {
        self.tiles_per_player = tiles;
        self
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_start_height(mut self, height: i32) -> Self {
        self.start_height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Number of cells within `radius` of the origin
    pub fn layout_capacity(&self) -> usize {
        let r = self.radius.max(0) as usize;
        1 + 3 * r * (r + 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() < 2 {
            return Err(ConfigError::TooFewPlayers(self.players.len()));
        }
        for (i, player) in self.players.iter().enumerate() {
            if player.trim().is_empty() || player.contains(',') || player != player.trim() {
                return Err(ConfigError::InvalidPlayerId(player.clone()));
            }
            if self.players[..i].contains(player) {
                return Err(ConfigError::DuplicatePlayer(player.clone()));
            }
        }
        if self.tiles_per_player == 0 {
            return Err(ConfigError::NoTiles);
        }
        if !(1..=COORD_LIMIT).contains(&self.radius) {
            return Err(ConfigError::RadiusOutOfRange(self.radius));
        }
        let tiles = self.tiles_per_player * self.players.len();
        let capacity = self.layout_capacity();
        if tiles > capacity {
            return Err(ConfigError::LayoutTooSmall {
                tiles,
                radius: self.radius,
                capacity,
            });
        }
        if self.start_height < 1 {
            return Err(ConfigError::BadStartHeight(self.start_height));
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }
}
