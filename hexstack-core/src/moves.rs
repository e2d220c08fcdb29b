//! Moves between neighboring tiles

use crate::geometry::Hex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stack moving from `from` onto the stack at `to`, or no move at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Null,
    Step { from: Hex, to: Hex },
}

impl Move {
    pub fn from_to(from: Hex, to: Hex) -> Self {
        Move::Step { from, to }
    }

    /// Build a move from the four integers used by the backup format
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Move::Step {
            from: Hex::new(x0, y0),
            to: Hex::new(x1, y1),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Move::Null)
    }

    pub fn source(&self) -> Option<Hex> {
        match self {
            Move::Null => None,
            Move::Step { from, .. } => Some(*from),
        }
    }

    pub fn destination(&self) -> Option<Hex> {
        match self {
            Move::Null => None,
            Move::Step { to, .. } => Some(*to),
        }
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::Null
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Null => f.write_str("pass"),
            Move::Step { from, to } => write!(f, "{} -> {}", from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Move::new(0, 0, 1, 0), Move::from_to(Hex::new(0, 0), Hex::new(1, 0)));
        assert_ne!(Move::new(0, 0, 1, 0), Move::new(1, 0, 0, 0));
        assert_ne!(Move::new(0, 0, 0, 0), Move::Null);
    }

    #[test]
    fn test_endpoints() {
        let mv = Move::new(2, -1, 3, -1);
        assert_eq!(mv.source(), Some(Hex::new(2, -1)));
        assert_eq!(mv.destination(), Some(Hex::new(3, -1)));
        assert!(Move::Null.source().is_none());
        assert!(Move::default().is_null());
    }
}
