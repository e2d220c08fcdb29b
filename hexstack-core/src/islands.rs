//! Connected components ("islands") of tiles under hex adjacency

use crate::board::Board;
use crate::geometry::Hex;

impl Board {
    /// How many of the six neighbors of `hex` hold a tile
    pub fn neighbors_occupied_count(&self, hex: Hex) -> usize {
        hex.neighbors()
            .iter()
            .filter(|n| self.tiles.contains_key(n))
            .count()
    }

    /// True if some tile of `self` borders some tile of `other`
    pub fn find_connection(&self, other: &Board) -> bool {
        self.tiles
            .keys()
            .any(|hex| hex.neighbors().iter().any(|n| other.tiles.contains_key(n)))
    }

    /// True if `hex` is a neighbor of any tile on this board
    fn touches(&self, hex: Hex) -> bool {
        hex.neighbors().iter().any(|n| self.tiles.contains_key(n))
    }

    /// Partition the tiles into maximal connected islands.
    ///
    /// Tiles are first attached to the first island they touch, in coordinate
    /// order, which can leave one real island split in several pieces; those
    /// pieces are then merged pairwise until no two islands border each other.
    pub fn islands(&self) -> Vec<Board> {
        let mut islands: Vec<Board> = Vec::new();

        for (hex, tile) in self.tiles_sorted() {
            match islands.iter_mut().find(|island| island.touches(hex)) {
                Some(island) => {
                    island.tiles.insert(hex, tile.clone());
                }
                None => {
                    let mut island = self.empty_like();
                    island.tiles.insert(hex, tile.clone());
                    islands.push(island);
                }
            }
        }

        while let Some((i, j)) = find_mergeable_pair(&islands) {
            let absorbed = islands.remove(j);
            islands[i].tiles.extend(absorbed.tiles);
        }

        islands
    }

    pub fn island_count(&self) -> usize {
        self.islands().len()
    }
}

/// First pair (i, j), i < j, of islands that border each other
fn find_mergeable_pair(islands: &[Board]) -> Option<(usize, usize)> {
    for i in 0..islands.len() {
        for j in (i + 1)..islands.len() {
            if islands[i].find_connection(&islands[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rustc_hash::FxHashSet;
    use std::collections::BTreeSet;

    /// Flood fill reference partition
    fn flood_fill(board: &Board) -> BTreeSet<BTreeSet<Hex>> {
        let mut seen = FxHashSet::default();
        let mut result = BTreeSet::new();
        for (start, _) in board.tiles_sorted() {
            if !seen.insert(start) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut stack = vec![start];
            while let Some(hex) = stack.pop() {
                component.insert(hex);
                for n in hex.neighbors() {
                    if board.contains(n) && seen.insert(n) {
                        stack.push(n);
                    }
                }
            }
            result.insert(component);
        }
        result
    }

    fn partition(islands: &[Board]) -> BTreeSet<BTreeSet<Hex>> {
        islands
            .iter()
            .map(|island| island.tiles().map(|(hex, _)| hex).collect::<BTreeSet<Hex>>())
            .collect()
    }

    #[test]
    fn test_two_separate_tiles() {
        let mut board = Board::new(["A", "B"]);
        board.place_tile(Hex::new(0, 0), "A", 1).unwrap();
        board.place_tile(Hex::new(5, 5), "B", 2).unwrap();
        let islands = board.islands();
        assert_eq!(islands.len(), 2);
        assert!(islands.iter().all(|island| island.len() == 1));
        assert!(islands.iter().all(|island| island.players() == board.players()));
    }

    #[test]
    fn test_seed_pass_split_gets_merged() {
        // (1,0) and (2,-1) are seeded apart; (2,0) joins the first and
        // borders the second, so the merge pass must join them.
        let mut board = Board::new(["A"]);
        for (x, y) in [(1, 0), (2, -1), (2, 0)] {
            board.place_tile(Hex::new(x, y), "A", 1).unwrap();
        }
        board.place_tile(Hex::new(-1, 5), "A", 1).unwrap();
        board.place_tile(Hex::new(-2, 5), "A", 1).unwrap();
        let islands = board.islands();
        assert_eq!(islands.len(), 2);
        let mut sizes: Vec<_> = islands.iter().map(Board::len).collect();
        sizes.sort();
        assert_eq!(sizes, vec![2, 3]);
    }

    #[test]
    fn test_u_shape_needs_merge() {
        let mut board = Board::new(["A"]);
        for (x, y) in [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)] {
            board.place_tile(Hex::new(x, y), "A", 1).unwrap();
        }
        assert_eq!(board.island_count(), 1);
    }

    #[test]
    fn test_empty_board_has_no_islands() {
        assert!(Board::new(["A"]).islands().is_empty());
    }

    #[test]
    fn test_matches_flood_fill() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..25 {
            let mut board = Board::new(["A", "B"]);
            for _ in 0..40 {
                let hex = Hex::new(rng.gen_range(-6..=6), rng.gen_range(-6..=6));
                let owner = if rng.gen_bool(0.5) { "A" } else { "B" };
                let _ = board.place_tile(hex, owner, rng.gen_range(1..=4));
            }
            let islands = board.islands();
            assert_eq!(partition(&islands), flood_fill(&board));
            assert_eq!(islands.iter().map(Board::len).sum::<usize>(), board.len());
        }
    }

    #[test]
    fn test_neighbors_occupied_count_and_connection() {
        let mut board = Board::new(["A"]);
        board.place_tile(Hex::new(0, 0), "A", 1).unwrap();
        board.place_tile(Hex::new(1, 0), "A", 1).unwrap();
        board.place_tile(Hex::new(0, -1), "A", 1).unwrap();
        assert_eq!(board.neighbors_occupied_count(Hex::new(0, 0)), 2);
        assert_eq!(board.neighbors_occupied_count(Hex::new(9, 9)), 0);

        let mut left = Board::new(["A"]);
        left.place_tile(Hex::new(0, 0), "A", 1).unwrap();
        let mut right = Board::new(["A"]);
        right.place_tile(Hex::new(1, 0), "A", 1).unwrap();
        let mut far = Board::new(["A"]);
        far.place_tile(Hex::new(3, 0), "A", 1).unwrap();
        assert!(left.find_connection(&right));
        assert!(right.find_connection(&left));
        assert!(!left.find_connection(&far));
    }
}
