//! Canonical form of a board and symmetry-aware comparison
//!
//! Two boards describe the same position when they agree after relabeling
//! players by roster order, re-centering on the origin, shifting heights so
//! the lowest stack is 1, and turning by some multiple of 60 degrees.

use crate::board::Board;
use crate::tile::PlayerId;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use md5::{Digest, Md5};
use rustc_hash::FxHashMap;
use std::fmt;

/// Text encodings of an essential digest
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigestFormat {
    Hex,
    Base64,
}

/// 128-bit fingerprint of a board's tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EssentialDigest([u8; 16]);

impl EssentialDigest {
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{:02x}", byte)).collect()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn encode(&self, format: DigestFormat) -> String {
        match format {
            DigestFormat::Hex => self.to_hex(),
            DigestFormat::Base64 => self.to_base64(),
        }
    }
}

impl fmt::Display for EssentialDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Board {
    /// Rewrite this board into canonical form.
    ///
    /// Players become "0", "1", ... in roster order. Tiles are shifted so the
    /// floored mean of their cube coordinates lands on the origin. A board
    /// forming a single island has its heights lowered so the smallest is 1.
    /// Owners missing from the roster keep their names.
    pub fn normalize(&mut self) {
        if self.is_empty() {
            return;
        }

        let labels: FxHashMap<PlayerId, PlayerId> = self
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i.to_string()))
            .collect();
        for tile in self.tiles.values_mut() {
            if let Some(label) = labels.get(&tile.owner) {
                tile.owner = label.clone();
            }
        }
        self.players = (0..self.players.len()).map(|i| i.to_string()).collect();

        self.recenter();

        if self.island_count() == 1 {
            if let Ok((min, _)) = self.min_max_heights() {
                self.adjust_heights(-(min - 1));
            }
        }
    }

    /// Shift the tiles so the floored mean of their cube coordinates is the
    /// origin. Translated or rotated copies of a board recenter onto the
    /// same cells.
    fn recenter(&mut self) {
        if self.is_empty() {
            return;
        }
        let n = self.tiles.len() as i64;
        let (sum_q, sum_r) = self.tiles.keys().fold((0i64, 0i64), |(sq, sr), hex| {
            let (q, r) = hex.to_cube();
            (sq + q as i64, sr + r as i64)
        });
        let q = sum_q.div_euclid(n) as i32;
        let r = sum_r.div_euclid(n) as i32;
        // a cube shift of (-q, -r) in offset terms
        self.translate(-q, -r + (-q) / 2);
    }

    /// Normalized copy of this board
    pub fn normalized(&self) -> Board {
        let mut board = self.clone();
        board.normalize();
        board
    }

    /// True if both boards have the same canonical form up to rotation
    pub fn compare_after_normalization(&self, other: &Board) -> bool {
        let mut mine = self.normalized();
        let theirs = other.normalized();
        for _ in 0..6 {
            if mine.tiles == theirs.tiles {
                return true;
            }
            mine.rotate60();
            mine.recenter();
        }
        false
    }

    /// MD5 over every (x, y, owner, height) in coordinate order.
    ///
    /// Not invariant under rotation or translation.
    pub fn essential_digest(&self) -> EssentialDigest {
        let text: String = self
            .tiles_sorted()
            .into_iter()
            .map(|(hex, tile)| format!("{},{},{},{};", hex.x, hex.y, tile.owner, tile.height))
            .collect();
        let digest = Md5::digest(text.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest);
        EssentialDigest(bytes)
    }

    pub fn essential_digest_as(&self, format: DigestFormat) -> String {
        self.essential_digest().encode(format)
    }

    /// Digests of this board and of its five successive 60 degree turns
    pub fn essential_digests_all_rotations(&self) -> [EssentialDigest; 6] {
        let mut board = self.clone();
        let mut digests = [EssentialDigest([0; 16]); 6];
        for (i, slot) in digests.iter_mut().enumerate() {
            if i > 0 {
                board.rotate60();
            }
            *slot = board.essential_digest();
        }
        digests
    }

    /// Cheap pre-check: some rotation of `self` digests equal to some
    /// rotation of `other`
    pub fn digest_equivalent(&self, other: &Board) -> bool {
        let mine = self.essential_digests_all_rotations();
        let theirs = other.essential_digests_all_rotations();
        mine.iter().any(|d| theirs.contains(d))
    }
}
