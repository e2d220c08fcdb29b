//! A stack of tokens owned by one player

use serde::{Deserialize, Serialize};

/// Player identifier as used in the roster
pub type PlayerId = String;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub owner: PlayerId,
    pub height: i32,
}

impl Tile {
    pub fn new(owner: impl Into<PlayerId>, height: i32) -> Self {
        Self {
            owner: owner.into(),
            height,
        }
    }
}
