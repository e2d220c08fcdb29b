//! Error types for board operations

use crate::geometry::Hex;
use std::fmt;

/// Why a tile could not be placed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementFault {
    OutOfRange,
    Occupied,
    UnknownOwner,
    NonPositiveHeight,
}

impl fmt::Display for PlacementFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            PlacementFault::OutOfRange => "coordinate out of range",
            PlacementFault::Occupied => "coordinate already occupied",
            PlacementFault::UnknownOwner => "owner is not a player on this board",
            PlacementFault::NonPositiveHeight => "height must be at least 1",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid placement at {hex}: {fault}")]
    InvalidPlacement { hex: Hex, fault: PlacementFault },

    #[error("board has no tiles")]
    EmptyBoard,

    #[error("no tile at {0}")]
    MissingTile(Hex),
}

pub type BoardResult<T> = Result<T, BoardError>;
