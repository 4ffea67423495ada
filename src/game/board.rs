// src/game/board.rs
//
// The fixed 5x8 tile grid and the palisade adjacency graph between tiles.
// Pure queries only: all grid/palisade data lives in `GameState`.

use std::collections::HashMap;

use itertools::iproduct;

use super::types::{
    GameState, PalisadeId, PalisadeState, Tile, BOARD_COLS, BOARD_ROWS,
};
use crate::errors::EngineError;

/// Fixed gold layout for the board: (row, col, value).
pub const GOLD_TILES: [(usize, usize, u8); 7] = [
    (0, 4, 3),
    (1, 1, 4),
    (1, 6, 6),
    (2, 2, 5),
    (3, 4, 4),
    (4, 1, 5),
    (4, 6, 3),
];

/// Linear tile index used in palisade keys: `row * width + col`.
pub fn linear_index(row: usize, col: usize) -> usize {
    row * BOARD_COLS + col
}

pub fn in_bounds(row: usize, col: usize) -> bool {
    row < BOARD_ROWS && col < BOARD_COLS
}

pub fn tile_at(state: &GameState, row: usize, col: usize) -> Result<&Tile, EngineError> {
    if !in_bounds(row, col) {
        return Err(EngineError::OutOfBounds { row, col });
    }
    Ok(&state.tiles[row][col])
}

/// The up-to-4 orthogonally adjacent in-bounds coordinates.
pub fn neighbor_tiles(row: usize, col: usize) -> Vec<(usize, usize)> {
    let mut neighbors = Vec::with_capacity(4);
    if row > 0 {
        neighbors.push((row - 1, col));
    }
    if col > 0 {
        neighbors.push((row, col - 1));
    }
    if row + 1 < BOARD_ROWS {
        neighbors.push((row + 1, col));
    }
    if col + 1 < BOARD_COLS {
        neighbors.push((row, col + 1));
    }
    neighbors
}

fn are_adjacent(lo: usize, hi: usize) -> bool {
    if hi >= BOARD_ROWS * BOARD_COLS {
        return false;
    }
    let same_row = lo / BOARD_COLS == hi / BOARD_COLS;
    (hi - lo == 1 && same_row) || hi - lo == BOARD_COLS
}

/// Canonicalize an unordered adjacent tile pair into its lookup key.
pub fn palisade_key(id_a: usize, id_b: usize) -> Result<PalisadeId, EngineError> {
    let (lo, hi) = if id_a < id_b { (id_a, id_b) } else { (id_b, id_a) };
    if lo == hi || !are_adjacent(lo, hi) {
        return Err(EngineError::unknown_palisade(format!("{lo}-{hi}")));
    }
    Ok(format!("{lo}-{hi}"))
}

/// Parse a wire palisade id, rejecting anything that is not a canonical
/// adjacent in-bounds pair.
pub fn parse_palisade_id(id: &str) -> Result<PalisadeId, EngineError> {
    let reject = || EngineError::unknown_palisade(id);
    let (a, b) = id.split_once('-').ok_or_else(reject)?;
    let a: usize = a.parse().map_err(|_| reject())?;
    let b: usize = b.parse().map_err(|_| reject())?;
    if a >= b {
        // wire ids are always smaller-index-first
        return Err(reject());
    }
    palisade_key(a, b).map_err(|_| reject())
}

/// True iff both ids are in-bounds, adjacent, and the palisade slot between
/// them is unplaced. The board edge has no entry and is never passable.
pub fn is_passable(state: &GameState, id_a: usize, id_b: usize) -> bool {
    match palisade_key(id_a, id_b) {
        Ok(key) => matches!(state.palisades.get(&key), Some(PalisadeState::Unplaced)),
        Err(_) => false,
    }
}

/// The fixed initial grid: gold tiles from [`GOLD_TILES`], everything else empty.
pub fn starting_tiles() -> Vec<Vec<Tile>> {
    let mut tiles = vec![vec![Tile::Empty; BOARD_COLS]; BOARD_ROWS];
    for &(row, col, value) in &GOLD_TILES {
        tiles[row][col] = Tile::Gold { value };
    }
    tiles
}

/// One unplaced entry per adjacent in-bounds tile pair; 67 on the 5x8 board.
pub fn starting_palisades() -> HashMap<PalisadeId, PalisadeState> {
    let mut palisades = HashMap::new();
    for (row, col) in iproduct!(0..BOARD_ROWS, 0..BOARD_COLS) {
        let id = linear_index(row, col);
        if col + 1 < BOARD_COLS {
            palisades.insert(format!("{}-{}", id, id + 1), PalisadeState::Unplaced);
        }
        if row + 1 < BOARD_ROWS {
            palisades.insert(format!("{}-{}", id, id + BOARD_COLS), PalisadeState::Unplaced);
        }
    }
    palisades
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_palisades_complete_and_unplaced() {
        let palisades = starting_palisades();
        assert_eq!(palisades.len(), 67);
        assert!(palisades
            .values()
            .all(|&state| state == PalisadeState::Unplaced));
    }

    #[test]
    fn test_starting_tiles_gold_layout() {
        let tiles = starting_tiles();
        assert_eq!(tiles[1][1], Tile::Gold { value: 4 });
        let gold_count = tiles
            .iter()
            .flatten()
            .filter(|tile| matches!(tile, Tile::Gold { .. }))
            .count();
        assert_eq!(gold_count, GOLD_TILES.len());
    }

    #[test]
    fn test_palisade_key_canonicalizes_order() {
        assert_eq!(palisade_key(2, 1).unwrap(), "1-2");
        assert_eq!(palisade_key(8, 16).unwrap(), "8-16");
    }

    #[test]
    fn test_palisade_key_rejects_row_wrap() {
        // tiles 7 and 8 are numerically consecutive but on different rows
        assert!(palisade_key(7, 8).is_err());
    }

    #[test]
    fn test_palisade_key_rejects_out_of_bounds_and_non_adjacent() {
        assert!(palisade_key(39, 47).is_err());
        assert!(palisade_key(0, 2).is_err());
        assert!(palisade_key(3, 3).is_err());
    }

    #[test]
    fn test_parse_palisade_id_round_trips() {
        assert_eq!(parse_palisade_id("1-2").unwrap(), "1-2");
        assert_eq!(parse_palisade_id("8-16").unwrap(), "8-16");
    }

    #[test]
    fn test_parse_palisade_id_rejects_garbage() {
        for id in ["", "junk", "2-1", "1-1", "7-8", "1-2-3", "-1-2", "a-b"] {
            assert!(parse_palisade_id(id).is_err(), "accepted {id:?}");
        }
    }

    #[test]
    fn test_neighbor_tiles_counts() {
        assert_eq!(neighbor_tiles(0, 0).len(), 2);
        assert_eq!(neighbor_tiles(0, 3).len(), 3);
        assert_eq!(neighbor_tiles(2, 4).len(), 4);
        assert_eq!(neighbor_tiles(4, 7).len(), 2);
    }

    #[test]
    fn test_tile_at_bounds() {
        let state = GameState::new();
        assert_eq!(tile_at(&state, 0, 0).unwrap(), &Tile::Empty);
        assert_eq!(
            tile_at(&state, 5, 0),
            Err(EngineError::OutOfBounds { row: 5, col: 0 })
        );
        assert_eq!(
            tile_at(&state, 0, 8),
            Err(EngineError::OutOfBounds { row: 0, col: 8 })
        );
    }

    #[test]
    fn test_is_passable_edges_and_walls() {
        let mut state = GameState::new();
        assert!(is_passable(&state, 0, 1));
        assert!(is_passable(&state, 1, 0));
        // board edge: tile 7 has no right neighbor
        assert!(!is_passable(&state, 7, 8));

        state
            .palisades
            .insert("0-1".to_string(), PalisadeState::Placed);
        assert!(!is_passable(&state, 0, 1));
        assert!(!is_passable(&state, 1, 0));
    }
}
