use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::actions::PlayerAction;
use crate::errors::{AppError, AppResult};
use crate::game::engine::GameEngine;
use crate::game::types::{GameId, GameState};

/// Core application service for game management.
///
/// Hosts many independent engines keyed by game id and provides the
/// serialization the engine requires: each action takes the per-game write
/// lock, so effects of concurrent connections never interleave.
#[derive(Clone)]
pub struct GameService {
    games: Arc<RwLock<HashMap<GameId, Arc<RwLock<GameEngine>>>>>,
}

impl GameService {
    pub fn new() -> Self {
        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new game in the prologue phase and return its id.
    pub async fn create_game(&self) -> GameId {
        let game_id = Uuid::new_v4().to_string();
        let engine = GameEngine::new();

        let mut games = self.games.write().await;
        games.insert(game_id.clone(), Arc::new(RwLock::new(engine)));
        log::info!("Created game {game_id}");

        game_id
    }

    pub async fn game_exists(&self, game_id: &str) -> bool {
        let games = self.games.read().await;
        games.contains_key(game_id)
    }

    /// Get all active game IDs
    pub async fn list_games(&self) -> Vec<GameId> {
        let games = self.games.read().await;
        games.keys().cloned().collect()
    }

    /// Read-only snapshot of a game's full state.
    pub async fn snapshot(&self, game_id: &str) -> AppResult<GameState> {
        let engine = self.engine(game_id).await?;
        let engine = engine.read().await;
        Ok(engine.game_state())
    }

    /// Apply one player action and return the fresh snapshot.
    ///
    /// `actor` is the validated identity of the connection; move intents act
    /// as that player, setup intents name their player in the payload.
    pub async fn apply_action(
        &self,
        game_id: &str,
        actor: &str,
        action: PlayerAction,
    ) -> AppResult<GameState> {
        let engine = self.engine(game_id).await?;
        let mut engine = engine.write().await;

        let result = match &action {
            PlayerAction::JoinGame { player_id } => engine.join_game(player_id),
            PlayerAction::SetRace { player_id, race } => engine.set_race(player_id, *race),
            PlayerAction::SignalReady { player_id } => engine.signal_ready(player_id),
            PlayerAction::SelectTile { row, column, size } => {
                engine.add_token(actor, *row, *column, *size)
            }
            PlayerAction::PlacePalisade { palisade_id } => {
                engine.place_palisade(actor, palisade_id)
            }
            PlayerAction::EndTurn => engine.end_turn(actor),
        };

        match result {
            Ok(()) => {
                log::info!("Game {game_id}: {actor} applied {action:?}");
                Ok(engine.game_state())
            }
            Err(error) => {
                log::warn!("Game {game_id}: {actor} rejected ({error}) on {action:?}");
                Err(error.into())
            }
        }
    }

    /// Remove a game (cleanup once the hosting session ends).
    pub async fn remove_game(&self, game_id: &str) {
        let mut games = self.games.write().await;
        if games.remove(game_id).is_some() {
            log::info!("Removed game {game_id}");
        }
    }

    async fn engine(&self, game_id: &str) -> AppResult<Arc<RwLock<GameEngine>>> {
        let games = self.games.read().await;
        games
            .get(game_id)
            .cloned()
            .ok_or_else(|| AppError::game_not_found(game_id))
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}
