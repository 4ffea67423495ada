use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::types::{GameId, PalisadeId, PlayerId, Race};

/// Top-level error type for the server layers above the engine
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: GameId },

    #[error("Message deserialization failed: {details}")]
    Deserialization { details: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rejections produced by the game engine.
///
/// Every variant is local to the attempted action: the `GameState` is left
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineError {
    // Setup violations
    #[error("Unable to join game: already {max_players} players")]
    GameFull { max_players: usize },

    #[error("Player already joined: {player_id}")]
    DuplicatePlayer { player_id: PlayerId },

    #[error("Unknown player: {player_id}")]
    UnknownPlayer { player_id: PlayerId },

    #[error("Invalid race: {race}")]
    InvalidRace { race: Race },

    #[error("Race {race} already taken by {holder}")]
    RaceTaken { race: Race, holder: PlayerId },

    #[error("Setup is closed: the game has already started")]
    SetupClosed,

    // Turn violations
    #[error("Not {player_id}'s turn: current player is {current_player}")]
    NotYourTurn {
        player_id: PlayerId,
        current_player: PlayerId,
    },

    #[error("The game has not started yet")]
    GameNotStarted,

    #[error("The game is already over")]
    GameAlreadyOver,

    // Placement violations
    #[error("Tile ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("Tile ({row}, {col}) is already occupied")]
    TileOccupied { row: usize, col: usize },

    #[error("No reserve tokens of size {size} left")]
    NoReserve { size: u8 },

    #[error("Unknown palisade: {id}")]
    UnknownPalisade { id: String },

    #[error("Palisade already placed: {id}")]
    AlreadyPlaced { id: PalisadeId },
}

/// Result type aliases for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn unknown_player(player_id: impl Into<PlayerId>) -> Self {
        Self::UnknownPlayer {
            player_id: player_id.into(),
        }
    }

    pub fn unknown_palisade(id: impl Into<String>) -> Self {
        Self::UnknownPalisade { id: id.into() }
    }
}

impl AppError {
    pub fn game_not_found(game_id: impl Into<GameId>) -> Self {
        Self::GameNotFound {
            game_id: game_id.into(),
        }
    }
}
