//! Backup files: the initial board plus every move, in INI-style text
//!
//! ```text
//! [game]
//! players = red,blue
//!
//! [tile0]
//! x = 0
//! y = 0
//! owner = red
//! height = 1
//!
//! [move0]
//! player_id = red
//! x0 = 0
//! y0 = 0
//! x1 = 1
//! y1 = 0
//! ```
//!
//! A move section without coordinates records a pass.

use crate::board::Board;
use crate::error::BoardError;
use crate::game::{Game, GameError};
use crate::geometry::Hex;
use crate::moves::Move;
use crate::tile::{PlayerId, Tile};
use anyhow::Context;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("missing section [{0}]")]
    MissingSection(String),

    #[error("section [{section}] is missing key '{key}'")]
    MissingKey { section: String, key: String },

    #[error("section [{section}] key '{key}': '{value}' is not an integer")]
    BadInteger {
        section: String,
        key: String,
        value: String,
    },

    #[error("move {index}: expected {expected} to play, found {found}")]
    OutOfTurn {
        index: usize,
        expected: PlayerId,
        found: PlayerId,
    },

    #[error("move {index}: {source}")]
    Replay { index: usize, source: GameError },

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Everything needed to rebuild a game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backup {
    pub players: Vec<PlayerId>,
    pub tiles: Vec<(Hex, Tile)>,
    pub moves: Vec<(PlayerId, Move)>,
}

impl Backup {
    pub fn from_game(game: &Game) -> Self {
        let initial = game.initial_board();
        Self {
            players: initial.players().to_vec(),
            tiles: initial
                .tiles_sorted()
                .into_iter()
                .map(|(hex, tile)| (hex, tile.clone()))
                .collect(),
            moves: game.history().to_vec(),
        }
    }

    pub fn to_ini_string(&self) -> String {
        self.to_string()
    }

    pub fn parse(text: &str) -> Result<Self, BackupError> {
        let sections = parse_sections(text)?;

        let game = sections
            .get("game")
            .ok_or_else(|| BackupError::MissingSection("game".to_string()))?;
        let players: Vec<PlayerId> = game
            .require("players")?
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        let mut tiles = BTreeMap::new();
        let mut moves = BTreeMap::new();
        for (name, section) in &sections {
            if let Some(index) = numbered(name, "tile") {
                let hex = Hex::new(section.integer("x")?, section.integer("y")?);
                let tile = Tile::new(section.require("owner")?, section.integer("height")?);
                tiles.insert(index, (hex, tile));
            } else if let Some(index) = numbered(name, "move") {
                let player = section.require("player_id")?.to_string();
                let mv = if section.has_any(&["x0", "y0", "x1", "y1"]) {
                    Move::new(
                        section.integer("x0")?,
                        section.integer("y0")?,
                        section.integer("x1")?,
                        section.integer("y1")?,
                    )
                } else {
                    Move::Null
                };
                moves.insert(index, (player, mv));
            } else if name != "game" {
                tracing::warn!("Ignoring unknown backup section [{}]", name);
            }
        }

        Ok(Self {
            players,
            tiles: tiles.into_values().collect(),
            moves: moves.into_values().collect(),
        })
    }

    /// Board as it stood before the first recorded move
    pub fn initial_board(&self) -> Result<Board, BackupError> {
        let mut board = Board::new(self.players.iter().cloned());
        for (hex, tile) in &self.tiles {
            board.place_tile(*hex, &tile.owner, tile.height)?;
        }
        Ok(board)
    }

    /// Rebuild the game by placing the initial tiles and replaying each move
    pub fn replay(&self) -> Result<Game, BackupError> {
        self.replay_with(|_, _| {})
    }

    /// Like `replay`, calling `on_move(index, game)` after each recorded move
    /// has been checked and played
    pub fn replay_with<F>(&self, mut on_move: F) -> Result<Game, BackupError>
    where
        F: FnMut(usize, &Game),
    {
        let mut game = Game::new(self.initial_board()?)?;
        for (index, (player, mv)) in self.moves.iter().enumerate() {
            if game.current_player() != player {
                return Err(BackupError::OutOfTurn {
                    index,
                    expected: game.current_player().clone(),
                    found: player.clone(),
                });
            }
            if let Err(source) = game.play(*mv) {
                tracing::warn!("Backup move {} ({}) does not replay: {}", index, mv, source);
                return Err(BackupError::Replay { index, source });
            }
            on_move(index, &game);
        }
        Ok(game)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_ini_string())
            .with_context(|| format!("writing backup {}", path.display()))?;
        tracing::info!("Saved backup to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading backup {}", path.display()))?;
        let backup = Backup::parse(&text)
            .with_context(|| format!("parsing backup {}", path.display()))?;
        Ok(backup)
    }
}

impl fmt::Display for Backup {
    /// INI text of the backup
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[game]")?;
        writeln!(f, "players = {}", self.players.join(","))?;
        for (i, (hex, tile)) in self.tiles.iter().enumerate() {
            writeln!(f, "\n[tile{}]", i)?;
            writeln!(f, "x = {}", hex.x)?;
            writeln!(f, "y = {}", hex.y)?;
            writeln!(f, "owner = {}", tile.owner)?;
            writeln!(f, "height = {}", tile.height)?;
        }
        for (i, (player, mv)) in self.moves.iter().enumerate() {
            writeln!(f, "\n[move{}]", i)?;
            writeln!(f, "player_id = {}", player)?;
            if let Move::Step { from, to } = mv {
                writeln!(f, "x0 = {}", from.x)?;
                writeln!(f, "y0 = {}", from.y)?;
                writeln!(f, "x1 = {}", to.x)?;
                writeln!(f, "y1 = {}", to.y)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// INI PARSING
// ============================================================================

struct Section {
    name: String,
    values: BTreeMap<String, String>,
}

impl Section {
    fn require(&self, key: &str) -> Result<&str, BackupError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| BackupError::MissingKey {
                section: self.name.clone(),
                key: key.to_string(),
            })
    }

    fn integer(&self, key: &str) -> Result<i32, BackupError> {
        let value = self.require(key)?;
        value.parse().map_err(|_| BackupError::BadInteger {
            section: self.name.clone(),
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    fn has_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.values.contains_key(*k))
    }
}

fn parse_sections(text: &str) -> Result<BTreeMap<String, Section>, BackupError> {
    let mut sections: BTreeMap<String, Section> = BTreeMap::new();
    let mut current: Option<String> = None;

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let syntax = |message: &str| BackupError::Syntax {
            line: i + 1,
            message: message.to_string(),
        };
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| syntax("unterminated section header"))?
                .trim();
            if name.is_empty() {
                return Err(syntax("empty section name"));
            }
            if sections.contains_key(name) {
                return Err(syntax("duplicate section"));
            }
            sections.insert(
                name.to_string(),
                Section {
                    name: name.to_string(),
                    values: BTreeMap::new(),
                },
            );
            current = Some(name.to_string());
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| syntax("expected 'key = value'"))?;
        let section = current
            .as_ref()
            .and_then(|name| sections.get_mut(name))
            .ok_or_else(|| syntax("key outside of any section"))?;
        section
            .values
            .insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(sections)
}

/// `tile12` with prefix `tile` -> Some(12)
fn numbered(name: &str, prefix: &str) -> Option<usize> {
    name.strip_prefix(prefix)?.parse().ok()
}
