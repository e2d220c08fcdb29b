//! Hex grid geometry with offset coordinates
//!
//! Columns alternate parity: odd columns sit half a cell lower than even
//! columns, so the neighbor offsets of a cell depend on whether `x` is even.
//! Rings around the origin are precomputed once into a shared lookup table.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinates placed on a board must lie in `[-COORD_LIMIT, COORD_LIMIT]`
pub const COORD_LIMIT: i32 = 32;

/// Largest ring distance found inside the placement square (its corners)
pub const MAX_RING: i32 = 48;

/// Offset hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub x: i32,
    pub y: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this hex may hold a placed tile
    pub fn in_range(&self) -> bool {
        let range = -COORD_LIMIT..=COORD_LIMIT;
        range.contains(&self.x) && range.contains(&self.y)
    }

    pub fn is_even_column(&self) -> bool {
        self.x.rem_euclid(2) == 0
    }

    /// The six neighbors, in the fixed enumeration order of the offset tables
    pub fn neighbors(&self) -> [Hex; 6] {
        let offsets = if self.is_even_column() {
            EVEN_COLUMN_OFFSETS
        } else {
            ODD_COLUMN_OFFSETS
        };
        offsets.map(|(dx, dy)| Hex::new(self.x + dx, self.y + dy))
    }

    pub fn is_neighbor(&self, other: Hex) -> bool {
        self.neighbors().contains(&other)
    }

    /// Ring distance from the origin
    pub fn ring_distance(&self) -> i32 {
        ring_distance(*self)
    }

    /// Convert to cube coordinates (q, r); s is implied as -q-r
    pub(crate) fn to_cube(self) -> (i32, i32) {
        let q = self.x;
        let r = self.y - self.x.div_euclid(2);
        (q, r)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Neighbor offsets (dx, dy) for even columns
pub const EVEN_COLUMN_OFFSETS: [(i32, i32); 6] = [
    (-1, -1),
    (-1, 0),
    (0, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Neighbor offsets (dx, dy) for odd columns
pub const ODD_COLUMN_OFFSETS: [(i32, i32); 6] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (0, -1),
];

// ============================================================================
// RING TABLE
// ============================================================================

/// Perimeters of rings 1..=MAX_RING and the reverse index into them
struct RingTable {
    /// `perimeters[d - 1]` holds ring `d`
    perimeters: Vec<Vec<Hex>>,
    /// hex -> (ring distance, index within that ring's perimeter)
    positions: FxHashMap<Hex, (i32, usize)>,
}

impl RingTable {
    fn build() -> Self {
        let mut perimeters = Vec::with_capacity(MAX_RING as usize);
        let mut positions = FxHashMap::default();
        for distance in 1..=MAX_RING {
            let perimeter = build_perimeter(distance);
            for (index, &hex) in perimeter.iter().enumerate() {
                positions.insert(hex, (distance, index));
            }
            perimeters.push(perimeter);
        }
        Self {
            perimeters,
            positions,
        }
    }
}

static RING_TABLE: Lazy<RingTable> = Lazy::new(RingTable::build);

/// Walk ring `distance` as six sides of `distance` cells each.
///
/// The traversal order is what `rotate60` indexes into, so every side's
/// stride pattern matters.
fn build_perimeter(distance: i32) -> Vec<Hex> {
    let d = distance;
    let mut ring = Vec::with_capacity(6 * d as usize);
    for idx in 0..d {
        ring.push(Hex::new(idx, -d + idx / 2));
    }
    for idx in 0..d {
        ring.push(Hex::new(d, -((d - 1) / 2) - 1 + idx));
    }
    for idx in 0..d {
        ring.push(Hex::new(d - idx, d / 2 + (idx + d % 2) / 2));
    }
    for idx in 0..d {
        ring.push(Hex::new(-idx, d - (idx + 1) / 2));
    }
    for idx in 0..d {
        ring.push(Hex::new(-d, d / 2 - idx));
    }
    for idx in 0..d {
        ring.push(Hex::new(-d + idx, -d + (d - idx) / 2));
    }
    ring
}

/// Ring distance of `hex` from the origin (0 for the origin itself)
pub fn ring_distance(hex: Hex) -> i32 {
    if hex == Hex::ORIGIN {
        return 0;
    }
    match RING_TABLE.positions.get(&hex) {
        Some(&(distance, _)) => distance,
        None => cube_distance(hex),
    }
}

/// Closed-form distance, used beyond the precomputed rings
fn cube_distance(hex: Hex) -> i32 {
    let (q, r) = hex.to_cube();
    (q.abs() + r.abs() + (q + r).abs()) / 2
}

/// Ordered perimeter of ring `distance` (empty for distance 0)
pub fn ring_perimeter(distance: i32) -> Vec<Hex> {
    if distance <= 0 {
        return Vec::new();
    }
    if distance <= MAX_RING {
        return RING_TABLE.perimeters[(distance - 1) as usize].clone();
    }
    build_perimeter(distance)
}

/// Where `hex` sits on its ring: (distance, index). None for the origin.
pub fn ring_position(hex: Hex) -> Option<(i32, usize)> {
    if hex == Hex::ORIGIN {
        return None;
    }
    if let Some(&position) = RING_TABLE.positions.get(&hex) {
        return Some(position);
    }
    let distance = cube_distance(hex);
    build_perimeter(distance)
        .iter()
        .position(|&h| h == hex)
        .map(|index| (distance, index))
}

/// Position of `hex` after one 60 degree turn about the origin
pub fn rotate60(hex: Hex) -> Hex {
    let Some((distance, index)) = ring_position(hex) else {
        return hex;
    };
    let len = 6 * distance as usize;
    let target = (index + distance as usize) % len;
    if distance <= MAX_RING {
        RING_TABLE.perimeters[(distance - 1) as usize][target]
    } else {
        build_perimeter(distance)[target]
    }
}
