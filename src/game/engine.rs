// src/game/engine.rs
//
// The authoritative facade around one game: validates and applies player
// actions, advances the turn cycle, and drives phase transitions. Every
// rejection leaves the state exactly as it was; every accepted action
// re-derives `current_state`/`winner` before returning.

use std::collections::HashMap;

use super::board;
use super::scoring::{self, Score};
use super::types::{
    GameState, PalisadeState, Phase, PlayerId, PlayerState, Race, Tile, INITIAL_RESERVE,
    MAX_ARMY_SIZE, MAX_PLAYERS,
};
use crate::errors::{EngineError, EngineResult};

/// Predicate deciding when a running game is finished. Injectable so the
/// exact rule can change without touching the turn machinery.
pub type EndCondition = fn(&GameState) -> bool;

/// The game is settled once every palisade stands and no reserve token can
/// still reach the board (all reserves spent, or no empty tile remains).
pub fn default_end_condition(state: &GameState) -> bool {
    let walls_done = state
        .palisades
        .values()
        .all(|&slot| slot == PalisadeState::Placed);
    if !walls_done {
        return false;
    }
    let reserves_spent = state
        .players
        .values()
        .all(|player| player.tokens.iter().all(|&count| count == 0));
    let board_full = state
        .tiles
        .iter()
        .flatten()
        .all(|tile| !matches!(tile, Tile::Empty));
    reserves_spent || board_full
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    end_condition: EndCondition,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    pub fn new() -> Self {
        Self::with_end_condition(default_end_condition)
    }

    pub fn with_end_condition(end_condition: EndCondition) -> Self {
        GameEngine {
            state: GameState::new(),
            end_condition,
        }
    }

    /// Read-only snapshot of the full game state, suitable for transmission.
    pub fn game_state(&self) -> GameState {
        self.state.clone()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner.clone()
    }

    pub fn player_scores(&self) -> HashMap<PlayerId, Score> {
        scoring::player_scores(&self.state)
    }

    // --- prologue ---------------------------------------------------------

    pub fn join_game(&mut self, player_id: &str) -> EngineResult<()> {
        self.ensure_prologue()?;
        if self.state.player_order.len() >= MAX_PLAYERS {
            return Err(EngineError::GameFull {
                max_players: MAX_PLAYERS,
            });
        }
        if self.state.players.contains_key(player_id) {
            return Err(EngineError::DuplicatePlayer {
                player_id: player_id.to_string(),
            });
        }
        self.state.player_order.push(player_id.to_string());
        self.state
            .players
            .insert(player_id.to_string(), PlayerState::default());
        Ok(())
    }

    /// Race changes remain allowed, even after readying, until the game starts.
    pub fn set_race(&mut self, player_id: &str, race: Race) -> EngineResult<()> {
        self.ensure_prologue()?;
        if !self.state.players.contains_key(player_id) {
            return Err(EngineError::unknown_player(player_id));
        }
        if !self.state.player_setup.available_races.contains(&race) {
            return Err(EngineError::InvalidRace { race });
        }
        if let Some((holder, _)) = self
            .state
            .players
            .iter()
            .find(|(id, player)| player.race == Some(race) && id.as_str() != player_id)
        {
            return Err(EngineError::RaceTaken {
                race,
                holder: holder.clone(),
            });
        }
        let player = self
            .state
            .players
            .get_mut(player_id)
            .expect("membership checked above");
        player.race = Some(race);
        Ok(())
    }

    pub fn signal_ready(&mut self, player_id: &str) -> EngineResult<()> {
        self.ensure_prologue()?;
        let Some(player) = self.state.players.get_mut(player_id) else {
            return Err(EngineError::unknown_player(player_id));
        };
        player.ready = true;
        self.maybe_start();
        Ok(())
    }

    /// Setup completes once at least two players have joined and every
    /// joined player is ready with a race assigned. Until then readiness
    /// signals accumulate as a contractual no-op.
    fn maybe_start(&mut self) {
        let quorum = self.state.player_order.len() >= 2;
        let all_set = self.state.player_order.iter().all(|id| {
            self.state
                .players
                .get(id)
                .is_some_and(|player| player.ready && player.race.is_some())
        });
        if !(quorum && all_set) {
            return;
        }
        for player in self.state.players.values_mut() {
            player.tokens = INITIAL_RESERVE.to_vec();
        }
        self.state.current_player = self.state.player_order.first().cloned();
        self.state.current_state = Phase::AwaitingMove;
    }

    // --- awaiting-move ----------------------------------------------------

    pub fn add_token(
        &mut self,
        player_id: &str,
        row: usize,
        col: usize,
        size: u8,
    ) -> EngineResult<()> {
        self.ensure_turn(player_id)?;
        match board::tile_at(&self.state, row, col)? {
            Tile::Empty => {}
            _ => return Err(EngineError::TileOccupied { row, col }),
        }
        let slot = match size {
            1..=MAX_ARMY_SIZE => usize::from(size - 1),
            _ => return Err(EngineError::NoReserve { size }),
        };
        if self.state.players[player_id].tokens[slot] == 0 {
            return Err(EngineError::NoReserve { size });
        }

        self.state.tiles[row][col] = Tile::Army {
            player: player_id.to_string(),
            value: size,
        };
        let player = self
            .state
            .players
            .get_mut(player_id)
            .expect("current player is always a member");
        player.tokens[slot] -= 1;
        self.finish_turn();
        Ok(())
    }

    pub fn place_palisade(&mut self, player_id: &str, palisade_id: &str) -> EngineResult<()> {
        self.ensure_turn(player_id)?;
        let key = board::parse_palisade_id(palisade_id)?;
        match self.state.palisades.get(&key) {
            None => return Err(EngineError::unknown_palisade(palisade_id)),
            Some(PalisadeState::Placed) => {
                return Err(EngineError::AlreadyPlaced { id: key });
            }
            Some(PalisadeState::Unplaced) => {}
        }
        self.state.palisades.insert(key, PalisadeState::Placed);
        self.finish_turn();
        Ok(())
    }

    /// Pass: advances the turn cycle without touching board or reserves.
    pub fn end_turn(&mut self, player_id: &str) -> EngineResult<()> {
        self.ensure_turn(player_id)?;
        self.finish_turn();
        Ok(())
    }

    // --- turn plumbing ----------------------------------------------------

    fn ensure_prologue(&self) -> EngineResult<()> {
        match self.state.current_state {
            Phase::Prologue => Ok(()),
            Phase::AwaitingMove => Err(EngineError::SetupClosed),
            Phase::GameOver => Err(EngineError::GameAlreadyOver),
        }
    }

    fn ensure_turn(&self, player_id: &str) -> EngineResult<()> {
        match self.state.current_state {
            Phase::Prologue => return Err(EngineError::GameNotStarted),
            Phase::GameOver => return Err(EngineError::GameAlreadyOver),
            Phase::AwaitingMove => {}
        }
        match &self.state.current_player {
            Some(current) if current == player_id => Ok(()),
            Some(current) => Err(EngineError::NotYourTurn {
                player_id: player_id.to_string(),
                current_player: current.clone(),
            }),
            None => unreachable!("awaiting-move with no current player"),
        }
    }

    /// Settle or rotate: after every accepted action, either the end
    /// condition holds and the game is scored, or the turn passes to the
    /// next player in the fixed cycle.
    fn finish_turn(&mut self) {
        if (self.end_condition)(&self.state) {
            self.state.winner = scoring::determine_winner(&self.state);
            self.state.current_player = None;
            self.state.current_state = Phase::GameOver;
            return;
        }
        let order = &self.state.player_order;
        self.state.current_player = self
            .state
            .current_player
            .as_ref()
            .and_then(|current| order.iter().position(|id| id == current))
            .map(|idx| order[(idx + 1) % order.len()].clone());
    }
}
