// src/game/scoring.rs
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign};

use itertools::iproduct;

use super::territory::territory_containing;
use super::types::{GameState, PlayerId, Tile, BOARD_COLS, BOARD_ROWS};

/// An exact gold amount.
///
/// Carried in twelfths of a point (12 = lcm of every possible 1..=4-way
/// split on a four-player board), so evenly dividing a tile's value among
/// tied winners is plain integer arithmetic, never an approximation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    pub const ZERO: Score = Score(0);
    const SCALE: u32 = 12;

    pub fn from_gold(points: u8) -> Self {
        Score(u32::from(points) * Self::SCALE)
    }

    /// Even share of this amount among `ways` winners.
    pub fn split(self, ways: usize) -> Self {
        debug_assert!((1..=4).contains(&ways));
        Score(self.0 / ways as u32)
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score(self.0 + rhs.0)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let twelfths = self.0 % Self::SCALE;
        if twelfths == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}+{twelfths}/12")
        }
    }
}

/// Owners tied for the greatest summed army strength in the territory of
/// the given tile, in turn order. Empty when the territory holds no armies.
pub fn gold_winners_for_tile(state: &GameState, row: usize, col: usize) -> Vec<PlayerId> {
    let mut strengths: HashMap<&PlayerId, u32> = HashMap::new();
    for (r, c) in territory_containing(state, row, col) {
        if let Tile::Army { player, value } = &state.tiles[r][c] {
            *strengths.entry(player).or_insert(0) += u32::from(*value);
        }
    }

    let Some(&best) = strengths.values().max() else {
        return Vec::new();
    };

    state
        .player_order
        .iter()
        .filter(|id| strengths.get(id) == Some(&best))
        .cloned()
        .collect()
}

/// Aggregate score per player across every gold tile on the board.
///
/// A tile with a single winner awards its full value; tied winners share
/// it evenly. Players with nothing are absent from the map.
pub fn player_scores(state: &GameState) -> HashMap<PlayerId, Score> {
    let mut scores = HashMap::new();
    for (row, col) in iproduct!(0..BOARD_ROWS, 0..BOARD_COLS) {
        let Tile::Gold { value } = &state.tiles[row][col] else {
            continue;
        };
        let winners = gold_winners_for_tile(state, row, col);
        if winners.is_empty() {
            continue;
        }
        let share = Score::from_gold(*value).split(winners.len());
        for winner in winners {
            *scores.entry(winner).or_insert(Score::ZERO) += share;
        }
    }
    scores
}

/// The player with the strict-maximum aggregate score; on a shared maximum,
/// the earliest in turn order among the maxima.
pub fn determine_winner(state: &GameState) -> Option<PlayerId> {
    let scores = player_scores(state);
    let mut winner: Option<(&PlayerId, Score)> = None;
    for id in &state.player_order {
        let score = scores.get(id).copied().unwrap_or(Score::ZERO);
        match winner {
            Some((_, best)) if score <= best => {}
            _ => winner = Some((id, score)),
        }
    }
    winner.map(|(id, _)| id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::engine::GameEngine;

    // Mirrors the corner scenario: armies at (0,0) and (1,0) for player-1,
    // one army at (0,1) for player-2, then four walls sealing off the 2x2
    // corner around the gold tile at (1,1).
    fn corner_scenario(p2_size: u8) -> GameState {
        let mut engine = GameEngine::new();
        engine.join_game("player-1").unwrap();
        engine.join_game("player-2").unwrap();
        engine.set_race("player-1", crate::game::types::Race::Elf).unwrap();
        engine.set_race("player-2", crate::game::types::Race::Mage).unwrap();
        engine.signal_ready("player-1").unwrap();
        engine.signal_ready("player-2").unwrap();

        engine.add_token("player-1", 0, 0, 1).unwrap();
        engine.add_token("player-2", 0, 1, p2_size).unwrap();
        engine.add_token("player-1", 1, 0, 1).unwrap();
        engine.place_palisade("player-2", "1-2").unwrap();
        engine.place_palisade("player-1", "8-16").unwrap();
        engine.place_palisade("player-2", "9-10").unwrap();
        engine.place_palisade("player-1", "9-17").unwrap();

        engine.game_state()
    }

    #[test]
    fn test_single_winner_takes_the_territory() {
        let state = corner_scenario(1);
        assert_eq!(gold_winners_for_tile(&state, 1, 1), vec!["player-1"]);
    }

    #[test]
    fn test_equal_strength_ties_both_players() {
        let state = corner_scenario(2);
        assert_eq!(
            gold_winners_for_tile(&state, 1, 1),
            vec!["player-1", "player-2"]
        );
    }

    #[test]
    fn test_empty_territory_has_no_winners() {
        let state = GameState::new();
        assert!(gold_winners_for_tile(&state, 1, 1).is_empty());
    }

    #[test]
    fn test_sole_winner_scores_full_tile_value() {
        let state = corner_scenario(1);
        let scores = player_scores(&state);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores["player-1"], Score::from_gold(4));
    }

    #[test]
    fn test_tied_winners_split_the_tile_evenly() {
        let state = corner_scenario(2);
        let scores = player_scores(&state);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["player-1"], Score::from_gold(2));
        assert_eq!(scores["player-2"], Score::from_gold(2));
    }

    #[test]
    fn test_scores_never_exceed_total_gold() {
        let total: Score = crate::game::board::GOLD_TILES
            .iter()
            .fold(Score::ZERO, |acc, &(_, _, value)| acc + Score::from_gold(value));
        for state in [corner_scenario(1), corner_scenario(2)] {
            let awarded = player_scores(&state)
                .values()
                .fold(Score::ZERO, |acc, &s| acc + s);
            assert!(awarded <= total);
        }
    }

    #[test]
    fn test_every_contested_territory_awards_all_gold() {
        // one army on the open board contests every gold tile at once
        let mut state = GameState::new();
        state.player_order.push("player-1".to_string());
        state.tiles[0][0] = Tile::Army {
            player: "player-1".to_string(),
            value: 1,
        };

        let total: Score = crate::game::board::GOLD_TILES
            .iter()
            .fold(Score::ZERO, |acc, &(_, _, value)| acc + Score::from_gold(value));
        let scores = player_scores(&state);
        assert_eq!(scores["player-1"], total);
    }

    #[test]
    fn test_determine_winner_prefers_higher_score() {
        let state = corner_scenario(1);
        assert_eq!(determine_winner(&state), Some("player-1".to_string()));
    }

    #[test]
    fn test_determine_winner_breaks_ties_by_turn_order() {
        let state = corner_scenario(2);
        assert_eq!(determine_winner(&state), Some("player-1".to_string()));
    }

    #[test]
    fn test_three_way_split_stays_exact() {
        let share = Score::from_gold(4).split(3);
        assert_eq!(share + share + share, Score::from_gold(4));
        assert_eq!(share.to_string(), "1+4/12");
        assert_eq!(Score::from_gold(2).to_string(), "2");
    }
}
