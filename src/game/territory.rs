// src/game/territory.rs
use std::collections::{HashSet, VecDeque};

use super::board;
use super::types::GameState;

/// The maximal connected region of tiles reachable from the start tile
/// through passable edges, start included.
///
/// Breadth-first over the current palisade graph; O(tiles) per call. No
/// memoization: palisade placement invalidates any cached region.
pub fn territory_containing(
    state: &GameState,
    row: usize,
    col: usize,
) -> HashSet<(usize, usize)> {
    let mut region = HashSet::new();
    let mut queue = VecDeque::new();
    region.insert((row, col));
    queue.push_back((row, col));

    while let Some((r, c)) = queue.pop_front() {
        let from = board::linear_index(r, c);
        for (nr, nc) in board::neighbor_tiles(r, c) {
            if region.contains(&(nr, nc)) {
                continue;
            }
            if board::is_passable(state, from, board::linear_index(nr, nc)) {
                region.insert((nr, nc));
                queue.push_back((nr, nc));
            }
        }
    }

    region
}
