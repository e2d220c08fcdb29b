//! Board state: tiles keyed by hex coordinate plus the player roster

use crate::error::{BoardError, BoardResult, PlacementFault};
use crate::geometry::{self, Hex};
use crate::moves::Move;
use crate::tile::{PlayerId, Tile};
use rustc_hash::FxHashMap;

/// Inclusive coordinate extent of the tiles on a board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

/// Tiles on a hex grid and the players that may own them
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    pub(crate) tiles: FxHashMap<Hex, Tile>,
    pub(crate) players: Vec<PlayerId>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn new<I, P>(players: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlayerId>,
    {
        Self {
            tiles: FxHashMap::default(),
            players: players.into_iter().map(Into::into).collect(),
        }
    }

    /// Empty board sharing this board's roster
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            tiles: FxHashMap::default(),
            players: self.players.clone(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, hex: Hex) -> Option<&Tile> {
        self.tiles.get(&hex)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.tiles.contains_key(&hex)
    }

    /// Iterate tiles in map order
    pub fn tiles(&self) -> impl Iterator<Item = (Hex, &Tile)> + '_ {
        self.tiles.iter().map(|(&hex, tile)| (hex, tile))
    }

    /// Tiles ordered by coordinate (x, then y)
    pub fn tiles_sorted(&self) -> Vec<(Hex, &Tile)> {
        let mut tiles: Vec<_> = self.tiles().collect();
        tiles.sort_by_key(|&(hex, _)| hex);
        tiles
    }

    /// Tiles owned by `player`, ordered by coordinate
    pub fn player_tiles(&self, player: &str) -> Vec<(Hex, &Tile)> {
        let mut tiles: Vec<_> = self.tiles().filter(|(_, tile)| tile.owner == player).collect();
        tiles.sort_by_key(|&(hex, _)| hex);
        tiles
    }

    // ========================================================================
    // PLACEMENT
    // ========================================================================

    /// Place a new tile, checking range, occupancy, owner and height
    pub fn place_tile(&mut self, hex: Hex, owner: &str, height: i32) -> BoardResult<()> {
        let fault = if !hex.in_range() {
            Some(PlacementFault::OutOfRange)
        } else if self.tiles.contains_key(&hex) {
            Some(PlacementFault::Occupied)
        } else if !self.players.iter().any(|p| p == owner) {
            Some(PlacementFault::UnknownOwner)
        } else if height <= 0 {
            Some(PlacementFault::NonPositiveHeight)
        } else {
            None
        };
        if let Some(fault) = fault {
            return Err(BoardError::InvalidPlacement { hex, fault });
        }
        self.tiles.insert(hex, Tile::new(owner, height));
        Ok(())
    }

    /// Insert or replace a tile without any validation
    pub fn insert_tile(&mut self, hex: Hex, tile: Tile) -> Option<Tile> {
        self.tiles.insert(hex, tile)
    }

    // ========================================================================
    // GEOMETRY
    // ========================================================================

    /// Shift every tile by (dx, dy).
    ///
    /// An odd `dx` flips column parity, and odd columns sit half a cell
    /// lower, so y picks up a correction of 0 or 1 depending on the source
    /// column. The result is a rigid move of the grid and
    /// `translate(-dx, -dy)` undoes it exactly.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let tiles = std::mem::take(&mut self.tiles);
        self.tiles = tiles
            .into_iter()
            .map(|(hex, tile)| (translated(hex, dx, dy), tile))
            .collect();
    }

    /// Turn the board 60 degrees about the origin
    pub fn rotate60(&mut self) {
        let tiles = std::mem::take(&mut self.tiles);
        self.tiles = tiles
            .into_iter()
            .map(|(hex, tile)| (geometry::rotate60(hex), tile))
            .collect();
    }

    /// Add `dz` to every height; no clamping
    pub fn adjust_heights(&mut self, dz: i32) {
        for tile in self.tiles.values_mut() {
            tile.height += dz;
        }
    }

    pub fn min_max_heights(&self) -> BoardResult<(i32, i32)> {
        let mut heights = self.tiles.values().map(|t| t.height);
        let first = heights.next().ok_or(BoardError::EmptyBoard)?;
        Ok(heights.fold((first, first), |(lo, hi), h| (lo.min(h), hi.max(h))))
    }

    pub fn min_max_positions(&self) -> BoardResult<PositionBounds> {
        let mut hexes = self.tiles.keys();
        let first = hexes.next().ok_or(BoardError::EmptyBoard)?;
        let start = PositionBounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Ok(hexes.fold(start, |b, h| PositionBounds {
            min_x: b.min_x.min(h.x),
            max_x: b.max_x.max(h.x),
            min_y: b.min_y.min(h.y),
            max_y: b.max_y.max(h.y),
        }))
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Every move available to `player`: onto any occupied neighbor whose
    /// stack is no taller than the moving one
    pub fn legal_moves(&self, player: &str) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, tile) in self.player_tiles(player) {
            for to in from.neighbors() {
                if let Some(target) = self.tiles.get(&to) {
                    if target.height <= tile.height {
                        moves.push(Move::from_to(from, to));
                    }
                }
            }
        }
        moves
    }

    pub fn has_legal_move(&self, player: &str) -> bool {
        self.tiles.iter().any(|(from, tile)| {
            tile.owner == player
                && from.neighbors().iter().any(|to| {
                    self.tiles
                        .get(to)
                        .is_some_and(|target| target.height <= tile.height)
                })
        })
    }

    pub fn is_legal_move(&self, mv: &Move) -> bool {
        let Move::Step { from, to } = *mv else {
            return false;
        };
        let (Some(source), Some(target)) = (self.tiles.get(&from), self.tiles.get(&to)) else {
            return false;
        };
        from.is_neighbor(to) && source.height >= target.height
    }

    /// Move the source stack onto the destination.
    ///
    /// Legality is not checked here; callers gate with `is_legal_move`.
    /// The destination takes the source's owner and combined height and the
    /// source hex is vacated. `Move::Null` leaves the board unchanged.
    pub fn apply_move(&mut self, mv: &Move) -> BoardResult<()> {
        let Move::Step { from, to } = *mv else {
            return Ok(());
        };
        let source = self
            .tiles
            .get(&from)
            .cloned()
            .ok_or(BoardError::MissingTile(from))?;
        let target = self
            .tiles
            .get_mut(&to)
            .ok_or(BoardError::MissingTile(to))?;
        target.height += source.height;
        target.owner = source.owner;
        self.tiles.remove(&from);
        Ok(())
    }

    /// True when no player on the roster can move
    pub fn is_game_over(&self) -> bool {
        !self.players.iter().any(|p| self.has_legal_move(p))
    }

    // ========================================================================
    // SCORING
    // ========================================================================

    /// Total height owned by each player; players without tiles score 0
    pub fn gains(&self) -> FxHashMap<PlayerId, i64> {
        let mut gains: FxHashMap<PlayerId, i64> =
            self.players.iter().map(|p| (p.clone(), 0)).collect();
        for tile in self.tiles.values() {
            *gains.entry(tile.owner.clone()).or_insert(0) += tile.height as i64;
        }
        gains
    }

    /// Gains in roster order
    pub fn gains_in_order(&self) -> Vec<(PlayerId, i64)> {
        let gains = self.gains();
        self.players
            .iter()
            .map(|p| (p.clone(), gains.get(p).copied().unwrap_or(0)))
            .collect()
    }

    /// Players sharing the highest gain, in roster order
    pub fn winners(&self) -> Vec<PlayerId> {
        let gains = self.gains_in_order();
        let Some(best) = gains.iter().map(|&(_, g)| g).max() else {
            return Vec::new();
        };
        gains
            .into_iter()
            .filter(|&(_, g)| g == best)
            .map(|(p, _)| p)
            .collect()
    }
}

fn translated(hex: Hex, dx: i32, dy: i32) -> Hex {
    let x = hex.x + dx;
    let correction = x.div_euclid(2) - hex.x.div_euclid(2) - dx / 2;
    Hex::new(x, hex.y + dy + correction)
}
